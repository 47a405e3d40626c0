use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Filter directives scoping the chosen level to the scalewire crates.
    ///
    /// Dependencies stay capped at `warn` — at `--log-level trace` the
    /// interesting events are frame extraction and packet ingestion, not a
    /// dependency's internals.
    fn directives(self) -> String {
        let level = self.as_str();
        format!(
            "warn,scalewire={level},scalewire_link={level},scalewire_frame={level},\
             scalewire_packet={level},scalewire_report={level}"
        )
    }
}

/// Logs go to stderr so stdout stays a clean record stream.
///
/// `SCALEWIRE_LOG` accepts raw `EnvFilter` directives and overrides the
/// level flag entirely.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let filter = EnvFilter::try_from_env("SCALEWIRE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(level.directives()));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}
