//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily rotating file so they never interleave with the
//! shell's own output on stdout.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "cmdrepl=info,warn";

/// Log level used when debug mode is on and RUST_LOG is not set.
const DEBUG_LOG_FILTER: &str = "cmdrepl=debug,warn";

/// Initialize the logging system.
///
/// Sets up tracing with:
/// - Daily rotating file appender in `log_dir`, or the user's local data directory
/// - Log level configuration via `RUST_LOG` environment variable
/// - Structured output with file/line numbers
///
/// # Log Directory
///
/// Without an explicit directory, logs are stored in:
/// - Linux: `~/.local/share/cmdrepl/logs/`
/// - macOS: `~/Library/Application Support/cmdrepl/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\cmdrepl\logs\`
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be determined or created
/// - The tracing subscriber cannot be set
pub fn init(log_dir: Option<&Path>, debug: bool, environment: &str) -> anyhow::Result<()> {
    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => get_log_directory()?,
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "cmdrepl.log");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment,
        "cmdrepl starting up"
    );
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn default_filter(debug: bool) -> &'static str {
    if debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// Get the log directory path.
///
/// Returns the platform-specific local data directory with `cmdrepl/logs` appended.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("cmdrepl").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("cmdrepl shutting down");
}
