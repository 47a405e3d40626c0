use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::config::LinkConfig;
use crate::error::{LinkError, Result};

/// What kind of byte source the link was opened on.
///
/// The poll loop needs this to interpret a zero-length read: on a character
/// device it means the VTIME read timeout elapsed (idle line, keep polling);
/// on a regular file it means the capture has been fully consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Serial character device configured via termios.
    CharDevice,
    /// Regular file or FIFO holding a captured byte stream.
    File,
}

/// An opened sensor-link byte source — implements `Read`.
///
/// This is the fundamental I/O type the reader core consumes. The transport
/// identity (device path, baud rate) is decided by the caller; the core only
/// sees a stream of bytes.
pub struct LinkStream {
    inner: LinkInner,
}

enum LinkInner {
    #[cfg(unix)]
    Device(File),
    File(File),
}

impl LinkStream {
    /// Open a sensor link at `path`.
    ///
    /// Character devices are put into raw mode at the configured baud rate
    /// with a bounded read timeout. Regular files and FIFOs are opened as-is
    /// (capture replay, tests). Directories and other path types are
    /// rejected.
    pub fn open(path: impl AsRef<Path>, config: &LinkConfig) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| LinkError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file_type = metadata.file_type();

        if file_type.is_dir() {
            return Err(LinkError::UnsupportedDevice {
                path: path.to_path_buf(),
            });
        }

        #[cfg(unix)]
        {
            use std::os::fd::AsRawFd;
            use std::os::unix::fs::{FileTypeExt, OpenOptionsExt};

            if file_type.is_char_device() {
                let file = std::fs::OpenOptions::new()
                    .read(true)
                    .write(true)
                    .custom_flags(libc::O_NOCTTY | libc::O_NONBLOCK)
                    .open(path)
                    .map_err(|e| LinkError::Open {
                        path: path.to_path_buf(),
                        source: e,
                    })?;

                crate::serial::configure(file.as_raw_fd(), config).map_err(|e| {
                    LinkError::Configure {
                        path: path.to_path_buf(),
                        source: e,
                    }
                })?;

                info!(?path, baud = config.baud.as_u32(), "opened sensor link device");
                return Ok(Self {
                    inner: LinkInner::Device(file),
                });
            }
        }

        let file = File::open(path).map_err(|e| LinkError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(?path, "opened capture byte source");
        Ok(Self {
            inner: LinkInner::File(file),
        })
    }

    /// The kind of source this stream reads from.
    pub fn kind(&self) -> LinkKind {
        match self.inner {
            #[cfg(unix)]
            LinkInner::Device(_) => LinkKind::CharDevice,
            LinkInner::File(_) => LinkKind::File,
        }
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        match self.kind() {
            LinkKind::CharDevice => "serial-device",
            LinkKind::File => "capture-file",
        }
    }
}

impl Read for LinkStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            #[cfg(unix)]
            LinkInner::Device(file) => file.read(buf),
            LinkInner::File(file) => file.read(buf),
        }
    }
}

impl std::fmt::Debug for LinkStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkStream")
            .field("type", &self.transport_name())
            .finish()
    }
}
