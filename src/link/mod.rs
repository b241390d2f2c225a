//! Link Module
//!
//! Connection lifecycle and the typed robot API.
//!
//! ## Usage
//! ```rust,ignore
//! let config = LinkConfig::builder("/dev/ttyACM0").build()?;
//! let mut conn = Connection::new(config);
//! conn.connect()?;
//!
//! let mut robot = conn.robot()?;
//! robot.set_speeds(200, 200)?;
//! let mv = robot.battery()?;
//! ```
//!
//! ## Concurrency
//! A connection has a single owner and performs no locking. Use
//! [`crate::shared::SharedConnection`] to share one between threads.

mod connection;
mod robot;

pub use connection::{Connection, LinkStatus};
pub use robot::Robot;
