use scalewire_packet::ParsedPacket;
use serde::Serialize;
use tracing::debug;

/// The emitted snapshot document.
///
/// Serialized as a single JSON record with exactly these three fields;
/// key casing is part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Channel readings of the most recently ingested packet.
    pub channels: Vec<i64>,
    /// Grand total accumulated across the window, not an individual
    /// packet's declared total.
    #[serde(rename = "TOTAL")]
    pub total: i64,
    /// Validity flag of the last ingested packet.
    #[serde(rename = "VALID")]
    pub valid: bool,
}

/// Accumulates parsed packets between emissions.
///
/// Owned exclusively by the poll loop. The grand total sums declared totals
/// across every ingested packet; the channel list is replaced wholesale by
/// each packet (last packet wins, no merging).
#[derive(Debug)]
pub struct AggregationWindow {
    grand_total: i64,
    channels: Vec<i64>,
    last_valid: bool,
    packets: usize,
}

impl AggregationWindow {
    pub fn new() -> Self {
        Self {
            grand_total: 0,
            channels: Vec::new(),
            // An empty window reports valid: 0 declared == 0 computed.
            last_valid: true,
            packets: 0,
        }
    }

    /// Fold one parsed packet into the window. Never skipped: every parsed
    /// packet is reflected in the next emitted grand total.
    pub fn ingest(&mut self, packet: &ParsedPacket) {
        self.grand_total += packet.declared_total.get();
        self.channels = packet.channel_values();
        self.last_valid = packet.valid;
        self.packets += 1;
        debug!(
            declared = packet.declared_total.get(),
            grand_total = self.grand_total,
            valid = packet.valid,
            "packet ingested"
        );
    }

    /// Extract the snapshot and reset the window, as one step.
    ///
    /// Nothing can be ingested between extraction and reset, which keeps the
    /// "grand total is exactly 0 after each emission" invariant trivially
    /// true.
    pub fn snapshot_and_reset(&mut self) -> Snapshot {
        let snapshot = Snapshot {
            channels: std::mem::take(&mut self.channels),
            total: self.grand_total,
            valid: self.last_valid,
        };
        self.grand_total = 0;
        self.last_valid = true;
        self.packets = 0;
        snapshot
    }

    /// Packets ingested since the last emission.
    pub fn packet_count(&self) -> usize {
        self.packets
    }

    /// Current grand total (diagnostics).
    pub fn grand_total(&self) -> i64 {
        self.grand_total
    }
}

impl Default for AggregationWindow {
    fn default() -> Self {
        Self::new()
    }
}
