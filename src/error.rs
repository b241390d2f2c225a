//! Error types for zumolink
//!
//! Provides a unified error type for all link operations.

use thiserror::Error;

/// Result type alias using ZumoError
pub type Result<T> = std::result::Result<T, ZumoError>;

/// Unified error type for zumolink operations
#[derive(Debug, Error)]
pub enum ZumoError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("could not open device {address}: {source}")]
    TransportUnavailable {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("communication failure: {0}")]
    Communication(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Handshake Errors
    // -------------------------------------------------------------------------
    #[error("unexpected identity: {payload:?}")]
    UnexpectedIdentity { payload: String },

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("contract violation: {0}")]
    ContractViolation(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`ZumoError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportUnavailable,
    Communication,
    UnexpectedIdentity,
    ContractViolation,
    Config,
}

impl ZumoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZumoError::TransportUnavailable { .. } => ErrorKind::TransportUnavailable,
            ZumoError::Communication(_) => ErrorKind::Communication,
            ZumoError::UnexpectedIdentity { .. } => ErrorKind::UnexpectedIdentity,
            ZumoError::ContractViolation(_) => ErrorKind::ContractViolation,
            ZumoError::Config(_) => ErrorKind::Config,
        }
    }

    /// Shorthand for a caller contract violation
    pub(crate) fn contract(message: impl Into<String>) -> Self {
        ZumoError::ContractViolation(message.into())
    }
}
