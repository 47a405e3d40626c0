use std::path::PathBuf;

use clap::{Args, Subcommand};
use scalewire_frame::DEFAULT_MAX_BUFFER;
use scalewire_link::DEFAULT_BAUD;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ingest the sensor link and emit snapshots every 10 seconds.
    Run(RunArgs),
    /// Decode a capture file and print each parsed packet.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Sensor link path: a serial device, or a capture file for replay.
    pub device: PathBuf,
    /// Serial baud rate (character devices only).
    #[arg(long, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,
    /// Buffered bytes allowed while waiting for a frame delimiter.
    #[arg(long, default_value_t = DEFAULT_MAX_BUFFER)]
    pub max_buffer: usize,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Capture file holding the raw byte stream.
    pub file: PathBuf,
    /// Stop after decoding N frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
