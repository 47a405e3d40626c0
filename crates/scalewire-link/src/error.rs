use std::path::PathBuf;

/// Errors that can occur when opening or reading the sensor link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Failed to open the device or capture path.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to apply serial line settings to an opened device.
    #[error("failed to configure {path}: {source}")]
    Configure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The path exists but is not a readable byte source (e.g. a directory).
    #[error("unsupported device type: {path}")]
    UnsupportedDevice { path: PathBuf },

    /// The requested baud rate has no termios speed constant.
    #[error("unsupported baud rate: {rate}")]
    UnsupportedBaud { rate: u32 },

    /// An I/O error occurred on the link stream.
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LinkError>;
