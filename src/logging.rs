//! Logging configuration using tracing
//!
//! Log level is controlled by the `COOKVIS_LOG` environment variable:
//!
//! ```bash
//! COOKVIS_LOG=debug cookvis summary cook.csv
//! COOKVIS_LOG=cookvis_rs=trace cookvis notes cook.csv
//! ```

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{CookVisError, Result};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "COOKVIS_LOG";

/// Filter used when `COOKVIS_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info,cookvis_rs=debug";

/// Log file prefix inside the log directory
pub const LOG_FILE: &str = "cookvis.log";

/// Build the filter from `COOKVIS_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging subsystem
///
/// Always logs to stderr. When `log_dir` is given, a daily rolling file is
/// written there as well.
pub fn init(log_dir: Option<&Path>) -> Result<()> {
    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE);
            Some(
                fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_timer(fmt::time::ChronoLocal::new(
                        "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                    )),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| CookVisError::Config(format!("Failed to install logger: {}", e)))?;

    if let Some(dir) = log_dir {
        tracing::debug!("Log directory: {}", dir.display());
    }

    Ok(())
}
