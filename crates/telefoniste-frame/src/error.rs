/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The stream ended before the 4-byte length header was complete.
    #[error("truncated header ({received} of 4 bytes before end of stream)")]
    TruncatedHeader { received: usize },

    /// The stream ended before the declared payload length was received.
    #[error("truncated body ({received} of {expected} bytes before end of stream)")]
    TruncatedBody { expected: usize, received: usize },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer stopped accepting bytes before the frame was written.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// Whether the peer sent malformed or truncated data, as opposed to the
    /// transport failing underneath us.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            FrameError::TruncatedHeader { .. }
                | FrameError::TruncatedBody { .. }
                | FrameError::PayloadTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
