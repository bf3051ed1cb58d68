//! Structured Logger
//!
//! Wraps `tracing` with a console layer, an optional rolling NDJSON file layer,
//! and `RUST_LOG`-based level control.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix for the daily rolling log.
const LOG_FILE_PREFIX: &str = "aura.log";

/// Initialize the global logger.
///
/// `RUST_LOG` wins over `level` when set. With `log_dir` the same events are
/// also written as NDJSON to `<log_dir>/aura.log.YYYY-MM-DD`.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logger<P: AsRef<Path>>(log_dir: Option<P>, level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir.as_ref(), LOG_FILE_PREFIX);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
