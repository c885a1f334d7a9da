//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when neither `RUST_LOG` nor a level is given.
const DEFAULT_LEVEL: &str = "info";

/// Installs a global tracing subscriber writing to a rotating log file.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable
/// 2. `level` argument
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Creates the log file's directory if it doesn't exist
/// - Silently skips setup if the directory cannot be created (logging is
///   optional; the plugin keeps working)
/// - Idempotent: only the first successful call installs a subscriber
///
/// # Example
///
/// ```rust,no_run
/// use highlight_selected::observability::init_tracing;
/// use std::path::Path;
///
/// init_tracing(Some("debug"), Path::new("/tmp/highlight-selected/plugin.log"));
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(level: Option<&str>, log_file: &Path) {
    if let Some(dir) = log_file.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LEVEL)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(FileWriter::new(log_file.to_path_buf()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
