//! Logging setup
//!
//! Diagnostics go through `tracing` and are written to stderr, leaving
//! stdout to listings and summaries. The filter is chosen from, in order:
//!
//! 1. the `CAMSH_LOG` environment variable (any `EnvFilter` directive)
//! 2. `--log-level` on the command line
//! 3. `logging.level` in the config file
//! 4. `warn`

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::CamshError;

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "CAMSH_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// `[logging]` table of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error or off
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// ANSI colors for text output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            color: default_true(),
        }
    }
}

/// Install the global subscriber
///
/// Calling this more than once keeps the first subscriber.
///
/// # Errors
///
/// Returns `CamshError::LoggingError` if the chosen directive is invalid.
pub fn init_logging(config: &LoggingConfig, cli_level: Option<&str>) -> Result<(), CamshError> {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), cli_level, config);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| CamshError::LoggingError(format!("Invalid log filter '{directive}': {e}")))?;

    let registry = Registry::default().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    if installed.is_err() {
        tracing::debug!("logging already initialized");
    }
    Ok(())
}

/// Pick the filter directive by precedence
fn filter_directive(env: Option<String>, cli_level: Option<&str>, config: &LoggingConfig) -> String {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| cli_level.map(str::to_string))
        .unwrap_or_else(|| config.level.clone())
}
