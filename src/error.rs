//! Error types for popwire
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using PopError
pub type Result<T> = std::result::Result<T, PopError>;

/// Unified error type for popwire operations
#[derive(Debug, Error)]
pub enum PopError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Socket failure, including read/write timeouts. Never retried here.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    /// Rejected locally, before anything is sent to the server.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol decode error: {0}")]
    ProtocolDecode(String),

    #[error("{command} requires server {required}, connected server is {actual}")]
    UnsupportedByServer {
        command: &'static str,
        required: String,
        actual: String,
    },

    /// The server answered with an error reply.
    #[error("Server error: {0}")]
    Server(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PopError {
    /// True for failures that originate in the transport rather than in
    /// argument validation or reply interpretation.
    pub fn is_transport(&self) -> bool {
        matches!(self, PopError::Io(_))
    }

    /// True when the transport gave up waiting (socket read/write timeout).
    pub fn is_timeout(&self) -> bool {
        match self {
            PopError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}
