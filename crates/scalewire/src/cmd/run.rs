use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use scalewire_frame::{FrameBuffer, FrameConfig};
use scalewire_link::{BaudRate, LinkConfig, LinkKind, LinkStream};
use scalewire_packet::parse_packet;
use scalewire_report::{seconds_of_minute, AggregationWindow, ScheduleTracker};
use tracing::{debug, info};

use crate::cmd::RunArgs;
use crate::exit::{io_error, link_error, CliError, CliResult, SUCCESS};
use crate::output::{print_snapshot, OutputFormat};

const READ_CHUNK_SIZE: usize = 1024;

/// The sleep is not a precision timer; snapshot timing is bounded by read
/// latency plus this, traded deliberately for loop simplicity.
const POLL_SLEEP: Duration = Duration::from_millis(100);

pub fn run(args: RunArgs, format: OutputFormat) -> CliResult<i32> {
    let baud =
        BaudRate::from_u32(args.baud).map_err(|err| link_error("invalid baud rate", err))?;
    let config = LinkConfig {
        baud,
        ..LinkConfig::default()
    };
    let mut link = LinkStream::open(&args.device, &config)
        .map_err(|err| link_error("failed to open sensor link", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    // Buffer, window and schedule state are owned by this loop alone;
    // nothing else mutates them.
    let mut buffer = FrameBuffer::with_config(FrameConfig {
        max_buffer_size: args.max_buffer,
    });
    let mut window = AggregationWindow::new();
    let mut tracker = ScheduleTracker::aligned_after(seconds_of_minute());

    info!(
        device = %args.device.display(),
        transport = link.transport_name(),
        next_boundary = tracker.next_boundary(),
        "ingest loop started"
    );

    let mut chunk = [0u8; READ_CHUNK_SIZE];
    while running.load(Ordering::SeqCst) {
        let read = match link.read(&mut chunk) {
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(io_error("sensor link read failed", err)),
        };

        if read == 0 && link.kind() == LinkKind::File {
            // The stream is done, so one-frame-per-tick pacing no longer
            // applies: drain whatever complete frames are still buffered and
            // flush the window, so no parsed packet is dropped at exit.
            while let Some(frame) = buffer.take_frame() {
                let packet = parse_packet(&frame.text());
                debug!(
                    bytes = frame.len(),
                    declared = packet.declared_total.get(),
                    valid = packet.valid,
                    "frame parsed"
                );
                window.ingest(&packet);
            }
            if window.packet_count() > 0 {
                let snapshot = window.snapshot_and_reset();
                print_snapshot(&snapshot, format);
            }
            info!("capture exhausted");
            break;
        }
        buffer.extend(&chunk[..read]);

        // At most one frame per tick; buffered extras drain on later ticks.
        if let Some(frame) = buffer.take_frame() {
            let packet = parse_packet(&frame.text());
            debug!(
                bytes = frame.len(),
                declared = packet.declared_total.get(),
                valid = packet.valid,
                "frame parsed"
            );
            window.ingest(&packet);
        }

        if tracker.should_emit(seconds_of_minute()) {
            let packets = window.packet_count();
            let snapshot = window.snapshot_and_reset();
            print_snapshot(&snapshot, format);
            debug!(packets, total = snapshot.total, "snapshot emitted");
            tracker.advance();
        }

        std::thread::sleep(POLL_SLEEP);
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
