//! Marker-delimited frame reassembly for the scalewire sensor stream.
//!
//! The indicator emits text packets bounded by literal markers:
//! - `/\r\n` opens a frame
//! - `\\\r\n` closes it
//!
//! Bytes arrive arbitrarily chunked. [`FrameBuffer`] accumulates unconsumed
//! bytes and hands back at most one complete frame per call; [`FrameReader`]
//! wraps any `Read` stream and blocks until a complete frame is available.
//! No partial reads, no buffer management in user code.

pub mod codec;
pub mod error;
pub mod reader;

pub use codec::{Frame, FrameBuffer, FrameConfig, DEFAULT_MAX_BUFFER, FRAME_END, FRAME_START};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
