//! Connection
//!
//! Owns the transport and walks the handshake state machine:
//!
//! ```text
//! Unopened ──open──▶ Opened ──identify──▶ Identified
//!     │                 │                     │
//!     └──────────┬──────┘                     │
//!                ▼                            ▼
//!             Failed                  (round-trip error) ──▶ Failed
//!
//! close() from any state ──▶ Closed (Failed stays Failed)
//! ```
//!
//! `Failed` and `Closed` are terminal: reconnecting means building a new
//! `Connection`. The transport is dropped on every path into them.

use std::mem;

use crate::config::LinkConfig;
use crate::error::{Result, ZumoError};
use crate::protocol::{self, Command, Response};
use crate::transport::{open_serial, SerialTransport, Transport};

use super::Robot;

/// Observable connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Unopened,
    Opened,
    Identified,
    Failed,
    Closed,
}

enum State<T> {
    Unopened,
    Opened(T),
    Identified { transport: T, identity: String },
    Failed { reason: String },
    Closed,
}

impl<T> State<T> {
    fn status(&self) -> LinkStatus {
        match self {
            State::Unopened => LinkStatus::Unopened,
            State::Opened(_) => LinkStatus::Opened,
            State::Identified { .. } => LinkStatus::Identified,
            State::Failed { .. } => LinkStatus::Failed,
            State::Closed => LinkStatus::Closed,
        }
    }
}

/// One logical link to a robot
pub struct Connection<T: Transport> {
    config: LinkConfig,
    state: State<T>,
}

impl<T: Transport> Connection<T> {
    /// Create an unopened connection
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            state: State::Unopened,
        }
    }

    /// Wrap a transport that is already open
    pub fn with_transport(config: LinkConfig, transport: T) -> Self {
        Self {
            config,
            state: State::Opened(transport),
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn status(&self) -> LinkStatus {
        self.state.status()
    }

    pub fn is_identified(&self) -> bool {
        self.status() == LinkStatus::Identified
    }

    /// Identity reported by the robot, once identified
    pub fn identity(&self) -> Option<&str> {
        match &self.state {
            State::Identified { identity, .. } => Some(identity),
            _ => None,
        }
    }

    /// Why the connection failed, if it did
    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            State::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Acquire the transport using `opener`
    pub fn open_with<F>(&mut self, opener: F) -> Result<()>
    where
        F: FnOnce(&LinkConfig) -> Result<T>,
    {
        match self.state {
            State::Unopened => {}
            State::Opened(_) | State::Identified { .. } => {
                return Err(ZumoError::contract(format!(
                    "{} is already open",
                    self.config.address
                )));
            }
            State::Failed { .. } | State::Closed => return Err(self.terminal_error()),
        }

        match opener(&self.config) {
            Ok(transport) => {
                tracing::debug!("Opened {}", self.config.address);
                self.state = State::Opened(transport);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Connection to {} failed: {}", self.config.address, e);
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Run the identify handshake on an opened transport
    ///
    /// Any failure closes the transport.
    pub fn identify(&mut self) -> Result<&str> {
        let mut transport = match mem::replace(&mut self.state, State::Closed) {
            State::Opened(transport) => transport,
            other => {
                let status = other.status();
                self.state = other;
                return Err(match status {
                    LinkStatus::Failed | LinkStatus::Closed => self.terminal_error(),
                    _ => ZumoError::contract(format!(
                        "cannot identify a connection in state {:?}",
                        status
                    )),
                });
            }
        };

        match self.handshake(&mut transport) {
            Ok(identity) => {
                tracing::info!(
                    "Connection to {} ({}) successful",
                    self.config.address,
                    identity
                );
                self.state = State::Identified {
                    transport,
                    identity,
                };
                Ok(self.identity().unwrap_or_default())
            }
            Err(e) => {
                tracing::warn!("Handshake with {} failed: {}", self.config.address, e);
                drop(transport);
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn handshake(&self, transport: &mut T) -> Result<String> {
        protocol::write_command(transport, &Command::Identify)?;
        let line = transport.read_line(self.config.line_terminator, self.config.max_line_len)?;
        tracing::trace!("<- {:02x?}", line);
        protocol::decode_identity(&line, self.config.identity_marker.as_bytes())
    }

    /// Open with `opener` and identify
    ///
    /// On an already identified connection this is a no-op returning the
    /// cached identity.
    pub fn connect_with<F>(&mut self, opener: F) -> Result<&str>
    where
        F: FnOnce(&LinkConfig) -> Result<T>,
    {
        match self.state {
            State::Identified { .. } => {
                tracing::debug!("{} already identified", self.config.address);
                return Ok(self.identity().unwrap_or_default());
            }
            State::Unopened => self.open_with(opener)?,
            State::Opened(_) => {}
            State::Failed { .. } | State::Closed => return Err(self.terminal_error()),
        }
        self.identify()
    }

    /// Close the transport; safe to call from any state
    pub fn close(&mut self) {
        if matches!(self.state, State::Failed { .. } | State::Closed) {
            return;
        }
        tracing::debug!("Closing {}", self.config.address);
        self.state = State::Closed;
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Borrow the command interface; only available once identified
    pub fn robot(&mut self) -> Result<Robot<'_, T>> {
        if !self.is_identified() {
            return Err(ZumoError::contract(format!(
                "{} is not identified (state {:?})",
                self.config.address,
                self.status()
            )));
        }
        Ok(Robot::new(self))
    }

    /// Write `command` and read its reply
    ///
    /// A transport failure tears the link down.
    pub(crate) fn exchange(&mut self, command: &Command) -> Result<Option<Response>> {
        let State::Identified { transport, .. } = &mut self.state else {
            return Err(ZumoError::contract(format!(
                "cannot send {:?}: {} is not identified",
                command, self.config.address
            )));
        };

        tracing::debug!("Sending {:?}", command);
        let result = protocol::round_trip(transport, command, &self.config);

        if let Err(e) = &result {
            tracing::warn!("{:?} on {} failed: {}", command, self.config.address, e);
            self.fail(e);
        }
        result
    }

    fn fail(&mut self, error: &ZumoError) {
        self.state = State::Failed {
            reason: error.to_string(),
        };
    }

    fn terminal_error(&self) -> ZumoError {
        ZumoError::contract(format!(
            "connection to {} is {:?}; create a new connection",
            self.config.address,
            self.status()
        ))
    }
}

impl Connection<SerialTransport> {
    /// Open the configured serial device
    pub fn open(&mut self) -> Result<()> {
        self.open_with(open_serial)
    }

    /// Open the configured serial device and identify the robot
    pub fn connect(&mut self) -> Result<&str> {
        self.connect_with(open_serial)
    }
}

impl<T: Transport> std::fmt::Debug for Connection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("address", &self.config.address)
            .field("baud_rate", &self.config.baud_rate)
            .field("status", &self.status())
            .field("identity", &self.identity())
            .finish()
    }
}
