//! Structured logging setup
//!
//! Provides JSON-formatted and human-readable logging with optional file output.
//! Log lines go to stderr so that command output on stdout stays clean.

use crate::config::LoggingConfig;
use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter: `RUST_LOG` when set, the configured level otherwise.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?)
}

/// Runs `f` with a plain stderr subscriber installed for the current thread.
///
/// Used while the configuration itself is loaded, before [`init_logging`]
/// can install the configured subscriber.
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let filter = env_filter(&LoggingConfig::default()).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr),
    );
    tracing::subscriber::with_default(subscriber, f)
}

/// Initialize logging based on configuration.
///
/// # Errors
///
/// Returns an error if the filter does not parse, the log file cannot be
/// opened, or a global subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use meetlog::config::LoggingConfig;
/// use meetlog::logging::init_logging;
///
/// init_logging(&LoggingConfig::default()).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config)?);

    if config.json_format {
        let stderr_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr);

        if let Some(file_path) = &config.file_path {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)?;

            let file_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(Arc::new(file));

            registry.with(stderr_layer).with(file_layer).try_init()?;
        } else {
            registry.with(stderr_layer).try_init()?;
        }
    } else {
        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr);

        if let Some(file_path) = &config.file_path {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)?;

            let file_layer = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_writer(Arc::new(file));

            registry.with(stderr_layer).with(file_layer).try_init()?;
        } else {
            registry.with(stderr_layer).try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "meetlog=info");
        assert!(!config.json_format);
        assert_eq!(config.file_path, None);
    }

    #[test]
    #[serial]
    fn test_env_filter_from_config_level() {
        std::env::remove_var("RUST_LOG");
        let config = LoggingConfig {
            level: "meetlog=debug".to_string(),
            ..LoggingConfig::default()
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    #[serial]
    fn test_bootstrap_logging_returns_closure_value() {
        std::env::remove_var("RUST_LOG");
        let value = with_bootstrap_logging(|| {
            tracing::warn!("Config file not found at missing.yaml, using defaults");
            42
        });
        assert_eq!(value, 42);
    }

    #[test]
    #[serial]
    fn test_env_filter_rejects_garbage_level() {
        std::env::remove_var("RUST_LOG");
        let config = LoggingConfig {
            level: "meetlog=loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(env_filter(&config).is_err());
    }
}
