//! Byte-source transport for the scalewire sensor link.
//!
//! The indicator hardware talks over a serial line, but the reader core only
//! needs "a stream of bytes with a bounded-latency read". This crate provides
//! that boundary: [`LinkStream`] opens a serial character device (configured
//! raw at the requested baud rate, with a read timeout so the poll loop never
//! stalls) or a regular file / FIFO holding a captured byte stream.
//!
//! This is the lowest layer of scalewire. Everything else builds on top of
//! the [`LinkStream`] type provided here.

pub mod config;
pub mod error;
pub mod stream;

#[cfg(unix)]
mod serial;

pub use config::{BaudRate, LinkConfig, DEFAULT_BAUD, DEFAULT_READ_TIMEOUT};
pub use error::{LinkError, Result};
pub use stream::{LinkKind, LinkStream};
