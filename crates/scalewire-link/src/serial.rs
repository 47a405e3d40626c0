use std::io;
use std::os::fd::RawFd;
use std::time::Duration;

use crate::config::{BaudRate, LinkConfig};

/// Put an opened tty into raw mode at the configured speed.
///
/// VMIN=0 / VTIME>0 gives the timed-read semantics the poll loop relies on:
/// a read returns whatever arrived within the timeout, or 0 bytes when the
/// line is idle.
pub(crate) fn configure(fd: RawFd, config: &LinkConfig) -> io::Result<()> {
    let speed = speed_constant(config.baud);
    let vtime = deciseconds(config.read_timeout);

    // SAFETY: `fd` is an open descriptor owned by the caller, and `tio` is a
    // valid writable pointer for the full termios struct.
    unsafe {
        let mut tio: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut tio) != 0 {
            return Err(io::Error::last_os_error());
        }

        libc::cfmakeraw(&mut tio);
        tio.c_cflag |= libc::CLOCAL | libc::CREAD;
        tio.c_cc[libc::VMIN] = 0;
        tio.c_cc[libc::VTIME] = vtime;

        if libc::cfsetispeed(&mut tio, speed) != 0 {
            return Err(io::Error::last_os_error());
        }
        if libc::cfsetospeed(&mut tio, speed) != 0 {
            return Err(io::Error::last_os_error());
        }
        if libc::tcsetattr(fd, libc::TCSANOW, &tio) != 0 {
            return Err(io::Error::last_os_error());
        }

        // The device is opened O_NONBLOCK so a wedged line cannot hang the
        // open call; clear it here so reads honor VTIME instead.
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        if libc::fcntl(fd, libc::F_SETFL, flags & !libc::O_NONBLOCK) < 0 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok(())
}

/// Timeout in VTIME units (tenths of a second), clamped to the u8 range.
/// A zero VTIME would make reads fully non-blocking and spin the loop.
fn deciseconds(timeout: Duration) -> libc::cc_t {
    (timeout.as_millis() / 100).clamp(1, 255) as libc::cc_t
}

fn speed_constant(baud: BaudRate) -> libc::speed_t {
    match baud {
        BaudRate::B1200 => libc::B1200,
        BaudRate::B2400 => libc::B2400,
        BaudRate::B4800 => libc::B4800,
        BaudRate::B9600 => libc::B9600,
        BaudRate::B19200 => libc::B19200,
        BaudRate::B38400 => libc::B38400,
        BaudRate::B57600 => libc::B57600,
        BaudRate::B115200 => libc::B115200,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_clamps_to_vtime_range() {
        assert_eq!(deciseconds(Duration::from_millis(1000)), 10);
        assert_eq!(deciseconds(Duration::from_millis(0)), 1);
        assert_eq!(deciseconds(Duration::from_secs(3600)), 255);
    }
}
