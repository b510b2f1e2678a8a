//! Runtime settings, plain data assembled from the command line.

use clap::ValueEnum;

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One compact human readable line per event.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Explicit filter directive, takes precedence over `RUST_LOG`.
    pub log_filter: Option<String>,
    /// Output format for log lines.
    pub log_format: LogFormat,
}

impl Settings {
    /// Filter used when neither `--log-level` nor `RUST_LOG` is given.
    pub const DEFAULT_FILTER: &'static str = "warn";
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: None,
            log_format: LogFormat::Compact,
        }
    }
}

/// What `run` prints for every word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Print every transition taken.
    pub trace: bool,
    /// Print nothing, only the exit code tells the outcome.
    pub quiet: bool,
}
