//! Configuration for a robot link
//!
//! Every link names its device explicitly; only the serial parameters have
//! defaults.

use std::time::Duration;

use crate::error::{Result, ZumoError};

/// Configuration for one serial link to a robot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    // -------------------------------------------------------------------------
    // Serial Configuration
    // -------------------------------------------------------------------------
    /// Device address (e.g. `/dev/ttyACM0` or `COM3`)
    pub address: String,

    /// Baud rate
    pub baud_rate: u32,

    /// Read timeout (milliseconds), always non-zero
    pub read_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Handshake Configuration
    // -------------------------------------------------------------------------
    /// Prefix the identify reply must start with
    pub identity_marker: String,

    /// Byte terminating the identify reply
    pub line_terminator: u8,

    /// Longest identify reply accepted, terminator included
    pub max_line_len: usize,
}

impl LinkConfig {
    pub const DEFAULT_BAUD_RATE: u32 = 9600;
    pub const DEFAULT_READ_TIMEOUT_MS: u64 = 2000;
    pub const DEFAULT_IDENTITY_MARKER: &'static str = "Zumo";
    pub const DEFAULT_MAX_LINE_LEN: usize = 64;

    /// Create a new config builder for the given device address
    pub fn builder(address: impl Into<String>) -> LinkConfigBuilder {
        LinkConfigBuilder {
            config: LinkConfig {
                address: address.into(),
                baud_rate: Self::DEFAULT_BAUD_RATE,
                read_timeout_ms: Self::DEFAULT_READ_TIMEOUT_MS,
                identity_marker: Self::DEFAULT_IDENTITY_MARKER.to_string(),
                line_terminator: b'\n',
                max_line_len: Self::DEFAULT_MAX_LINE_LEN,
            },
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Builder for LinkConfig
#[derive(Debug, Clone)]
pub struct LinkConfigBuilder {
    config: LinkConfig,
}

impl LinkConfigBuilder {
    /// Set the baud rate
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.config.baud_rate = baud;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the expected identity prefix
    pub fn identity_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.identity_marker = marker.into();
        self
    }

    /// Set the identify reply terminator
    pub fn line_terminator(mut self, terminator: u8) -> Self {
        self.config.line_terminator = terminator;
        self
    }

    /// Set the longest accepted identify reply
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    pub fn build(self) -> Result<LinkConfig> {
        let config = self.config;

        if config.address.trim().is_empty() {
            return Err(ZumoError::Config("device address is empty".to_string()));
        }
        if config.baud_rate == 0 {
            return Err(ZumoError::Config("baud rate must be non-zero".to_string()));
        }
        if config.read_timeout_ms == 0 {
            return Err(ZumoError::Config(
                "read timeout must be non-zero".to_string(),
            ));
        }
        if config.identity_marker.is_empty() {
            return Err(ZumoError::Config("identity marker is empty".to_string()));
        }
        if config.max_line_len <= config.identity_marker.len() {
            return Err(ZumoError::Config(format!(
                "max line length {} cannot hold identity marker {:?}",
                config.max_line_len, config.identity_marker
            )));
        }

        Ok(config)
    }
}
