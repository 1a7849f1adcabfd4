//! Logging setup: `tracing` events go to the console and, mirrored in full
//! regardless of `--quiet`, to a timestamped file under the output
//! directory.
//!
//! Two `fmt` layers share one `EnvFilter` (default `info`, overridable via
//! `RUST_LOG`), following the registry/layer composition pattern used
//! elsewhere in the pack for `tracing_subscriber`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Guard returned by [`init`]; dropping it has no special effect, it just
/// keeps the file handle's lifetime explicit at the call site.
pub struct LoggingGuard {
    _log_file: Mutex<File>,
}

/// Initialize the global tracing subscriber.
///
/// `output_dir` is created if missing; the file log is written to
/// `<output_dir>/run-<timestamp>.log`. `quiet` suppresses the console layer
/// only — the file layer always runs.
pub fn init(output_dir: &Path, timestamp: u64, quiet: bool) -> std::io::Result<LoggingGuard> {
    std::fs::create_dir_all(output_dir)?;
    let log_path = output_dir.join(format!("run-{timestamp}.log"));
    let file = File::create(&log_path)?;
    let file_for_layer = file.try_clone()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file_for_layer));

    if quiet {
        tracing_subscriber::registry().with(filter).with(file_layer).init();
    } else {
        let console_layer = fmt::layer().with_target(false);
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    }

    Ok(LoggingGuard {
        _log_file: Mutex::new(file),
    })
}
