use std::path::PathBuf;

use telefoniste_frame::FrameError;
use telefoniste_transport::TransportError;

/// Errors that can occur in session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The configured endpoint does not exist; no connection was attempted.
    #[error("endpoint not found: {path}")]
    EndpointNotFound { path: PathBuf },

    /// `open_client` was called on a session that is already open.
    #[error("session already open")]
    AlreadyOpen,

    /// Send or receive was attempted without an open connection.
    #[error("session not open")]
    NotOpen,

    /// The session has been closed; sessions are single-use.
    #[error("session closed (open a new session)")]
    Closed,

    /// The transport failed to connect, read, or write.
    #[error("transport error: {0}")]
    Transport(TransportError),

    /// The peer sent a malformed or truncated frame.
    #[error("protocol error: {0}")]
    Protocol(FrameError),
}

impl From<TransportError> for SessionError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::EndpointNotFound { path } => SessionError::EndpointNotFound { path },
            other => SessionError::Transport(other),
        }
    }
}

impl From<FrameError> for SessionError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Io(io) => SessionError::Transport(TransportError::Io(io)),
            FrameError::ConnectionClosed => {
                SessionError::Transport(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "peer stopped accepting bytes mid-frame",
                )))
            }
            other => SessionError::Protocol(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
