use std::time::Duration;

use crate::error::{LinkError, Result};

/// Baud rate the indicator hardware ships with.
pub const DEFAULT_BAUD: u32 = 2400;

/// Default bound on a single blocking read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(1000);

/// Serial line speeds the link supports.
///
/// Restricted to rates with a portable termios constant; anything else is
/// rejected at configuration time rather than silently rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaudRate {
    B1200,
    B2400,
    B4800,
    B9600,
    B19200,
    B38400,
    B57600,
    B115200,
}

impl BaudRate {
    /// Map a numeric rate to a supported speed.
    pub fn from_u32(rate: u32) -> Result<Self> {
        match rate {
            1200 => Ok(Self::B1200),
            2400 => Ok(Self::B2400),
            4800 => Ok(Self::B4800),
            9600 => Ok(Self::B9600),
            19200 => Ok(Self::B19200),
            38400 => Ok(Self::B38400),
            57600 => Ok(Self::B57600),
            115200 => Ok(Self::B115200),
            rate => Err(LinkError::UnsupportedBaud { rate }),
        }
    }

    /// The numeric rate, for diagnostics.
    pub fn as_u32(self) -> u32 {
        match self {
            Self::B1200 => 1200,
            Self::B2400 => 2400,
            Self::B4800 => 4800,
            Self::B9600 => 9600,
            Self::B19200 => 19200,
            Self::B38400 => 38400,
            Self::B57600 => 57600,
            Self::B115200 => 115200,
        }
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        Self::B2400
    }
}

/// Configuration applied when the link path is a serial character device.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Serial line speed.
    pub baud: BaudRate,
    /// Upper bound on a single read call. Granularity is 100 ms (termios
    /// VTIME); values are clamped to the representable range.
    pub read_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud: BaudRate::default(),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}
