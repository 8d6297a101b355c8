//! Tracing subscriber setup for the server.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("log filter `{directive}` is not a valid tracing directive")]
    InvalidFilter {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// `RUST_LOG` takes precedence over `APP_LOG_LEVEL`.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = config.log_level.trim();
    EnvFilter::try_new(directive).map_err(|source| TelemetryError::InvalidFilter {
        directive: directive.to_string(),
        source,
    })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: level.to_string(),
        }
    }

    #[test]
    fn invalid_level_names_the_directive() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        match env_filter(&config(" internship_hub=loud ")) {
            Err(error @ TelemetryError::InvalidFilter { .. }) => {
                assert!(error.to_string().contains("`internship_hub=loud`"));
                assert!(std::error::Error::source(&error).is_some());
            }
            other => panic!("expected filter error, got {other:?}"),
        }
    }

    #[test]
    fn module_directives_are_accepted() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(env_filter(&config("info,internship_hub::placements=debug")).is_ok());
    }
}
