//! # zumolink
//!
//! A serial remote-control client for the Zumo 32U4 robot:
//! - Bit-exact command encoding (ASCII opcodes, big-endian binary payloads)
//! - Fixed-width reply decoding with strict short-read detection
//! - Handshake state machine (open, identify, fail, close)
//! - Synchronous, single-owner request/response over one serial link
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Caller (CLI / teleop loop)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │             Connection  ──robot()──▶  Robot                  │
//! │   (Unopened → Opened → Identified | Failed | Closed)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Protocol codec                              │
//! │         (encode_command / read_response)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │   Transport   │
//!               │ (serial port) │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod transport;
pub mod link;
pub mod shared;
pub mod teleop;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, Result, ZumoError};
pub use config::LinkConfig;
pub use link::{Connection, LinkStatus, Robot};
pub use protocol::{Command, Response};
pub use shared::SharedConnection;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of zumolink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
