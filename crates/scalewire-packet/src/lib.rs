//! Weighed-item packet text parsing.
//!
//! A frame's interior is line-oriented text from the indicator:
//!
//! ```text
//! /
//! GROSS  00012Kg
//! TARE   00000Kg
//! TOTAL  00012Kg
//! \
//! ```
//!
//! A line containing the `TOTAL` keyword carries the declared total; a line
//! starting with an uppercase ASCII letter carries one channel reading.
//! Everything else (the marker lines included) is ignored. Numeric failures
//! never abort a packet — they degrade to a [`FieldValue::Defaulted`] zero,
//! kept distinguishable from a genuine zero so tests and diagnostics can
//! tell the two apart.

pub mod parser;
pub mod value;

pub use parser::{parse_packet, ParsedPacket, Reading, MASS_UNIT, TOTAL_KEYWORD};
pub use value::FieldValue;
