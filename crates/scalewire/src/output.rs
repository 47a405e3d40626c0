use std::io::IsTerminal;

use clap::ValueEnum;
use scalewire_packet::ParsedPacket;
use scalewire_report::Snapshot;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Emit one snapshot record to stdout, newline-terminated.
pub fn print_snapshot(snapshot: &Snapshot, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(snapshot).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Pretty => {
            println!(
                "channels={:?} total={} valid={}",
                snapshot.channels, snapshot.total, snapshot.valid
            );
        }
    }
}

#[derive(Serialize)]
struct PacketOutput {
    channels: Vec<i64>,
    declared_total: i64,
    computed_total: i64,
    valid: bool,
    defaulted_fields: usize,
}

impl PacketOutput {
    fn from_packet(packet: &ParsedPacket) -> Self {
        let defaulted_readings = packet
            .readings
            .iter()
            .filter(|r| r.value.is_defaulted())
            .count();
        Self {
            channels: packet.channel_values(),
            declared_total: packet.declared_total.get(),
            computed_total: packet.computed_total,
            valid: packet.valid,
            defaulted_fields: defaulted_readings
                + usize::from(packet.declared_total.is_defaulted()),
        }
    }
}

/// Emit one decoded-packet record to stdout (diagnostic `decode` command).
pub fn print_packet(packet: &ParsedPacket, format: OutputFormat) {
    let out = PacketOutput::from_packet(packet);
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Pretty => {
            println!(
                "channels={:?} declared={} computed={} valid={} defaulted={}",
                out.channels, out.declared_total, out.computed_total, out.valid,
                out.defaulted_fields
            );
        }
    }
}
