use tracing::debug;

use crate::value::FieldValue;

/// Keyword marking a line as the declared-total line.
pub const TOTAL_KEYWORD: &str = "TOTAL";

/// Unit suffix terminating a numeric field.
pub const MASS_UNIT: &str = "Kg";

/// One labeled channel reading, in frame order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// First character of the channel line.
    pub label: char,
    pub value: FieldValue,
}

/// The structured result of parsing one frame.
///
/// Constructed per extracted frame, consumed by the aggregation window,
/// then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPacket {
    /// Channel readings in frame order. Labels need not be unique.
    pub readings: Vec<Reading>,
    /// Total the indicator declared. `Defaulted` when the total line was
    /// absent or malformed.
    pub declared_total: FieldValue,
    /// Sum of the channel readings, derived independently.
    pub computed_total: i64,
    /// Whether the declared and computed totals agree.
    pub valid: bool,
}

impl ParsedPacket {
    /// Channel values in frame order, with defaulted readings as 0.
    pub fn channel_values(&self) -> Vec<i64> {
        self.readings.iter().map(|r| r.value.get()).collect()
    }
}

/// Parse one frame's text into a [`ParsedPacket`].
///
/// Line classification, in order:
/// - contains [`TOTAL_KEYWORD`] → declared-total line (a later one wins),
/// - non-empty with an uppercase ASCII first character → channel reading,
/// - anything else is ignored.
///
/// Never fails: malformed numeric fields degrade to [`FieldValue::Defaulted`].
pub fn parse_packet(text: &str) -> ParsedPacket {
    let mut readings = Vec::new();
    let mut declared_total = FieldValue::Defaulted;
    let mut computed_total: i64 = 0;

    for line in text.lines() {
        if line.contains(TOTAL_KEYWORD) {
            let value = extract_field(line);
            if value.is_defaulted() {
                debug!(line, "total field did not parse; defaulting to 0");
            }
            declared_total = value;
        } else if line.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            let value = extract_field(line);
            if value.is_defaulted() {
                debug!(line, "channel field did not parse; defaulting to 0");
            }
            computed_total += value.get();
            readings.push(Reading {
                label: line.chars().next().unwrap_or_default(),
                value,
            });
        }
    }

    let valid = declared_total.get() == computed_total;
    ParsedPacket {
        readings,
        declared_total,
        computed_total,
        valid,
    }
}

/// Extract the numeric field of a total or channel line.
///
/// The field is the last whitespace-separated token before the first
/// occurrence of [`MASS_UNIT`] (or before end of line when the unit suffix
/// is missing). This is deliberately independent of the indicator's column
/// layout — the value position varies between firmware revisions.
fn extract_field(line: &str) -> FieldValue {
    let end = line.find(MASS_UNIT).unwrap_or(line.len());
    match line[..end].split_whitespace().next_back() {
        Some(token) => token
            .parse::<i64>()
            .map(FieldValue::Parsed)
            .unwrap_or(FieldValue::Defaulted),
        None => FieldValue::Defaulted,
    }
}
