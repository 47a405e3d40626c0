//! Aggregation and scheduled snapshot emission for scalewire.
//!
//! Parsed packets flow into an [`AggregationWindow`], which keeps a running
//! grand total of declared totals and the most recent channel readings.
//! A [`ScheduleTracker`] decides, once per poll tick, whether the wall clock
//! has crossed the next 10-second boundary; when it has, the window is
//! snapshot-and-reset in one step and the [`Snapshot`] document is emitted.

pub mod schedule;
pub mod window;

pub use schedule::{seconds_of_minute, ScheduleTracker, EMIT_INTERVAL_SECS};
pub use window::{AggregationWindow, Snapshot};
