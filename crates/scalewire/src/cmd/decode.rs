use std::fs::File;

use scalewire_frame::{FrameError, FrameReader};
use scalewire_packet::parse_packet;
use tracing::info;

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};
use crate::output::{print_packet, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let file = File::open(&args.file).map_err(|err| io_error("failed to open capture", err))?;
    let mut reader = FrameReader::new(file);
    let mut decoded = 0usize;

    loop {
        if args.count.is_some_and(|count| decoded >= count) {
            break;
        }

        let frame = match reader.read_frame() {
            Ok(frame) => frame,
            Err(FrameError::EndOfStream) => break,
            Err(err) => return Err(frame_error("decode failed", err)),
        };

        let packet = parse_packet(&frame.text());
        print_packet(&packet, format);
        decoded += 1;
    }

    info!(
        frames = decoded,
        discarded = reader.buffer().discarded_bytes(),
        "capture decoded"
    );
    Ok(SUCCESS)
}
