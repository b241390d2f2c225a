//! Serial Transport
//!
//! Opens the robot's USB serial device.

use serialport::SerialPort;

use super::StreamTransport;
use crate::config::LinkConfig;
use crate::error::{Result, ZumoError};

/// Transport over a native serial port
pub type SerialTransport = StreamTransport<Box<dyn SerialPort>>;

/// Open the configured serial device
///
/// The port's read timeout bounds every blocking read on the link.
pub fn open_serial(config: &LinkConfig) -> Result<SerialTransport> {
    tracing::debug!(
        "Opening {} at {} baud (timeout {} ms)",
        config.address,
        config.baud_rate,
        config.read_timeout_ms
    );

    let port = serialport::new(config.address.as_str(), config.baud_rate)
        .timeout(config.read_timeout())
        .open()
        .map_err(|e| ZumoError::TransportUnavailable {
            address: config.address.clone(),
            source: e.into(),
        })?;

    Ok(StreamTransport::new(port))
}
