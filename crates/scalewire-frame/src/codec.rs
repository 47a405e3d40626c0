use bytes::{Buf, Bytes, BytesMut};
use tracing::warn;

/// Literal start-of-frame marker.
pub const FRAME_START: &[u8] = b"/\r\n";

/// Literal end-of-frame marker.
pub const FRAME_END: &[u8] = b"\\\r\n";

/// Default maximum number of buffered bytes without a complete frame: 64 KiB.
///
/// A healthy indicator emits a frame every few seconds; a buffer this deep
/// with no delimiter in it means line noise or a wedged device.
pub const DEFAULT_MAX_BUFFER: usize = 64 * 1024;

const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// One delimited unit of raw packet text, start and end markers inclusive.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The raw frame bytes, from start marker through end marker.
    pub payload: Bytes,
}

impl Frame {
    /// The frame as text. Indicator output is ASCII; anything else is
    /// replaced lossily rather than rejected.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// Total byte length including both markers.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Configuration for frame reassembly.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Buffered bytes allowed before a delimiter-less buffer is discarded
    /// and scanning resynchronizes from empty.
    pub max_buffer_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: DEFAULT_MAX_BUFFER,
        }
    }
}

/// Accumulates unconsumed stream bytes and extracts complete frames.
///
/// Owned exclusively by whoever drives the read loop. Bytes go in via
/// [`extend`](Self::extend); [`take_frame`](Self::take_frame) removes at most
/// one complete frame per call, so already-buffered frames are drained on
/// subsequent calls.
#[derive(Debug)]
pub struct FrameBuffer {
    buf: BytesMut,
    config: FrameConfig,
    discarded: usize,
}

impl FrameBuffer {
    /// Create a frame buffer with default configuration.
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    /// Create a frame buffer with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
            discarded: 0,
        }
    }

    /// Append newly read bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Extract the first complete frame, if one is buffered.
    ///
    /// A frame requires a start marker followed by an end marker. Garbage
    /// before the start marker is dropped with the frame. A stray end marker
    /// with no start marker before it is discarded and scanning repeats —
    /// extraction never yields an inverted or empty slice. When neither
    /// condition holds, returns `None` and leaves the buffer untouched,
    /// unless the buffer has outgrown its budget, in which case it is
    /// discarded wholesale to resynchronize.
    pub fn take_frame(&mut self) -> Option<Frame> {
        loop {
            let start = find_marker(&self.buf, FRAME_START);
            let end = find_marker(&self.buf, FRAME_END);

            match (start, end) {
                (Some(start), Some(end)) if start <= end => {
                    let after_end = end + FRAME_END.len();
                    let mut consumed = self.buf.split_to(after_end);
                    if start > 0 {
                        self.discarded += start;
                        consumed.advance(start);
                    }
                    return Some(Frame {
                        payload: consumed.freeze(),
                    });
                }
                (_, Some(end)) => {
                    // End marker before any start marker: noise from a frame
                    // we joined mid-stream. Drop through it and rescan.
                    let after_end = end + FRAME_END.len();
                    warn!(dropped = after_end, "stray end marker; resynchronizing");
                    self.discarded += after_end;
                    self.buf.advance(after_end);
                }
                _ => {
                    if self.buf.len() > self.config.max_buffer_size {
                        warn!(
                            buffered = self.buf.len(),
                            max = self.config.max_buffer_size,
                            "no frame delimiter within buffer budget; discarding"
                        );
                        self.discarded += self.buf.len();
                        self.buf.clear();
                    }
                    return None;
                }
            }
        }
    }

    /// Bytes currently buffered and not yet consumed into a frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Total bytes dropped so far (pre-frame garbage, stray end markers,
    /// buffer-budget resets).
    pub fn discarded_bytes(&self) -> usize {
        self.discarded
    }

    /// Frame buffer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn find_marker(haystack: &[u8], marker: &[u8]) -> Option<usize> {
    if haystack.len() < marker.len() {
        return None;
    }
    haystack.windows(marker.len()).position(|w| w == marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKET: &[u8] = b"/\r\nA 12Kg\r\nTOTAL 12Kg\r\n\\\r\n";

    #[test]
    fn extracts_complete_frame() {
        let mut buf = FrameBuffer::new();
        buf.extend(PACKET);

        let frame = buf.take_frame().expect("complete frame buffered");
        assert_eq!(frame.payload.as_ref(), PACKET);
        assert_eq!(buf.buffered(), 0);
        assert_eq!(buf.discarded_bytes(), 0);
    }

    #[test]
    fn frame_includes_both_markers() {
        let mut buf = FrameBuffer::new();
        buf.extend(PACKET);

        let frame = buf.take_frame().unwrap();
        assert!(frame.payload.starts_with(FRAME_START));
        assert!(frame.payload.ends_with(FRAME_END));
    }

    #[test]
    fn garbage_before_start_marker_is_dropped() {
        let mut buf = FrameBuffer::new();
        buf.extend(b"\x00\xffnoise");
        buf.extend(PACKET);

        let frame = buf.take_frame().unwrap();
        assert_eq!(frame.payload.as_ref(), PACKET);
        assert_eq!(buf.buffered(), 0);
        assert_eq!(buf.discarded_bytes(), 7);
    }

    #[test]
    fn start_without_end_waits_for_more_bytes() {
        let mut buf = FrameBuffer::new();
        buf.extend(b"/\r\nA 12Kg\r\n");

        assert!(buf.take_frame().is_none());
        assert_eq!(buf.buffered(), 11);

        buf.extend(b"TOTAL 12Kg\r\n\\\r\n");
        let frame = buf.take_frame().expect("frame completed by second read");
        assert_eq!(frame.payload.as_ref(), PACKET);
    }

    #[test]
    fn end_without_start_waits_too() {
        let mut buf = FrameBuffer::new();
        buf.extend(b"A 12Kg\r\n");
        assert!(buf.take_frame().is_none());
        assert_eq!(buf.buffered(), 8);
    }

    #[test]
    fn stray_end_marker_resynchronizes() {
        let mut buf = FrameBuffer::new();
        // Joined mid-stream: tail of a previous frame, then a whole one.
        buf.extend(b"TOTAL 7Kg\r\n\\\r\n");
        buf.extend(PACKET);

        let frame = buf.take_frame().expect("frame after resync");
        assert_eq!(frame.payload.as_ref(), PACKET);
        assert_eq!(buf.discarded_bytes(), 14);
    }

    #[test]
    fn stray_end_alone_yields_no_frame() {
        let mut buf = FrameBuffer::new();
        buf.extend(b"\\\r\n");
        assert!(buf.take_frame().is_none());
        assert_eq!(buf.buffered(), 0);
        assert_eq!(buf.discarded_bytes(), 3);
    }

    #[test]
    fn one_frame_per_call() {
        let mut buf = FrameBuffer::new();
        buf.extend(PACKET);
        buf.extend(b"/\r\nB 8Kg\r\nTOTAL 8Kg\r\n\\\r\n");

        let first = buf.take_frame().unwrap();
        assert_eq!(first.payload.as_ref(), PACKET);
        assert!(buf.buffered() > 0, "second frame still buffered");

        let second = buf.take_frame().unwrap();
        assert!(second.text().contains("B 8Kg"));
        assert!(buf.take_frame().is_none());
    }

    #[test]
    fn byte_at_a_time_accumulation() {
        let mut buf = FrameBuffer::new();
        for byte in &PACKET[..PACKET.len() - 1] {
            buf.extend(&[*byte]);
            assert!(buf.take_frame().is_none());
        }
        buf.extend(&PACKET[PACKET.len() - 1..]);
        let frame = buf.take_frame().expect("frame after last byte");
        assert_eq!(frame.payload.as_ref(), PACKET);
    }

    #[test]
    fn overgrown_delimiterless_buffer_resets() {
        let mut buf = FrameBuffer::with_config(FrameConfig {
            max_buffer_size: 16,
        });
        buf.extend(&[b'x'; 32]);

        assert!(buf.take_frame().is_none());
        assert_eq!(buf.buffered(), 0);
        assert_eq!(buf.discarded_bytes(), 32);

        // Stream recovers once real frames show up again.
        buf.extend(PACKET);
        assert!(buf.take_frame().is_some());
    }

    #[test]
    fn buffer_within_budget_is_kept() {
        let mut buf = FrameBuffer::with_config(FrameConfig {
            max_buffer_size: 64,
        });
        buf.extend(b"/\r\npartial");
        assert!(buf.take_frame().is_none());
        assert_eq!(buf.buffered(), 10);
    }
}
