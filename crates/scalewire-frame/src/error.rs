/// Errors that can occur while reading frames from a byte stream.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An I/O error occurred while reading from the underlying stream.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete frame was received.
    #[error("end of stream (incomplete frame)")]
    EndOfStream,
}

pub type Result<T> = std::result::Result<T, FrameError>;
