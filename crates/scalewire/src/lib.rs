//! Weighbridge sensor-link reader.
//!
//! scalewire continuously ingests the byte stream of a weighing indicator,
//! reassembles its marker-delimited text packets, validates each packet's
//! declared total against the sum of its channel readings, and emits one
//! aggregated JSON snapshot per 10-second wall-clock boundary.
//!
//! # Crate Structure
//!
//! - [`link`] — Byte-source transport (serial devices, capture files)
//! - [`frame`] — Marker-delimited frame reassembly
//! - [`packet`] — Packet text parsing and consistency validation
//! - [`report`] — Aggregation window, emission schedule, snapshot document

/// Re-export link types.
pub mod link {
    pub use scalewire_link::*;
}

/// Re-export frame types.
pub mod frame {
    pub use scalewire_frame::*;
}

/// Re-export packet types.
pub mod packet {
    pub use scalewire_packet::*;
}

/// Re-export report types.
pub mod report {
    pub use scalewire_report::*;
}
