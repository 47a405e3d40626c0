use std::time::{SystemTime, UNIX_EPOCH};

/// Emission cadence: a snapshot every 10 seconds, aligned to the wall clock.
pub const EMIT_INTERVAL_SECS: u32 = 10;

/// A boundary further than this behind `now` is considered stale rather
/// than crossed, so a long stall cannot trigger a burst of emissions.
const STALE_BOUNDARY_GUARD_SECS: u32 = 30;

const SECONDS_PER_MINUTE: u32 = 60;

/// Tracks the next 10-second emission boundary, as seconds-of-minute.
///
/// The tracker has no concept of minute or hour rollover: if the loop stalls
/// long enough for `now` to wrap past 60 before crossing the boundary, that
/// boundary is missed and the tracker catches the same value a minute later.
/// Acceptable for a loop whose tick is read-timeout + 100 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTracker {
    next_boundary: u32,
}

impl ScheduleTracker {
    /// Align to the next 10-second boundary strictly after `now_seconds`.
    pub fn aligned_after(now_seconds: u32) -> Self {
        let next_boundary =
            (now_seconds / EMIT_INTERVAL_SECS + 1) * EMIT_INTERVAL_SECS % SECONDS_PER_MINUTE;
        Self { next_boundary }
    }

    /// Whether the current tick should emit a snapshot.
    ///
    /// True exactly when `now_seconds` has reached the boundary and is not
    /// so far past it that the boundary value must be stale.
    pub fn should_emit(&self, now_seconds: u32) -> bool {
        now_seconds >= self.next_boundary
            && now_seconds - self.next_boundary < STALE_BOUNDARY_GUARD_SECS
    }

    /// Move to the following boundary. Called once per emission, which
    /// guarantees at most one emission per boundary value.
    pub fn advance(&mut self) {
        self.next_boundary = (self.next_boundary + EMIT_INTERVAL_SECS) % SECONDS_PER_MINUTE;
    }

    /// The boundary the tracker is waiting on (diagnostics).
    pub fn next_boundary(&self) -> u32 {
        self.next_boundary
    }
}

/// Current wall-clock seconds-of-minute, in [0, 60).
pub fn seconds_of_minute() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() % u64::from(SECONDS_PER_MINUTE)) as u32)
        .unwrap_or(0)
}
