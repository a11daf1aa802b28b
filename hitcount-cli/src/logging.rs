//! Logging initialization for the hitcount CLI.
//!
//! Configures `tracing-subscriber` based on the `[general]` section
//! of `HitcountConfig`. Logs go to stderr so rendered reports on stdout stay clean.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use hitcount_core::config::GeneralConfig;

use crate::error::CliError;

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
/// `RUST_LOG` wins over `level_override`, which wins over `config.log_level`.
///
/// # Formats
///
/// * `"json"` - Machine-parseable JSON lines
/// * `"pretty"` - Human-readable colored output
pub fn init_tracing(config: &GeneralConfig, level_override: Option<&str>) -> Result<(), CliError> {
    let level = level_override.unwrap_or(&config.log_level);
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| CliError::Config(format!("invalid log level '{level}': {e}")))?,
    };

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    CliError::Config(format!("failed to initialize JSON tracing subscriber: {e}"))
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    CliError::Config(format!(
                        "failed to initialize pretty tracing subscriber: {e}"
                    ))
                })?;
        }
        _ => {
            return Err(CliError::Config(format!(
                "unknown log format '{}', expected 'json' or 'pretty'",
                config.log_format
            )));
        }
    }

    Ok(())
}
