//! Error types for the protocol library.

use thiserror::Error;

/// Convenience alias for results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Protocol-level failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error from the underlying stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A structured frame was not valid JSON or had the wrong shape.
    #[error("malformed event: {0}")]
    Json(#[from] serde_json::Error),

    /// A structured frame named an event the server does not handle.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// A text line could not be split into command and parameters.
    #[error("unparseable line: {0:?}")]
    Unparseable(String),
}

impl ProtocolError {
    /// Whether the condition is limited to one frame and the stream can continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
