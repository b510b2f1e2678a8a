//! Tracing setup for the binary. The library only emits events, this installs the subscriber.
//!
//! ```bash
//! RUST_LOG=quintuple=trace quintuple run dfa.json 0,1
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, Settings};

/// Builds the filter: `--log-level` first, then `RUST_LOG`, then [`Settings::DEFAULT_FILTER`].
/// A malformed `--log-level` is an error, a malformed `RUST_LOG` falls back to the default.
pub fn filter(settings: &Settings) -> Result<EnvFilter> {
    if let Some(directive) = settings.log_filter.as_deref() {
        return EnvFilter::try_new(directive)
            .with_context(|| format!("invalid --log-level '{directive}'"));
    }
    Ok(EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Settings::DEFAULT_FILTER)))
}

/// Installs the global subscriber, writing to stderr. A second call is a no-op.
pub fn init(settings: &Settings) -> Result<()> {
    let registry = tracing_subscriber::registry().with(filter(settings)?);

    let _ = match settings.log_format {
        LogFormat::Compact => registry
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init(),
    };
    Ok(())
}
