use std::io;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::settings::LogFormat;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV: &str = "ODDLINE_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("logging already initialized: {0}")]
    Init(String),
}

/// Pick the filter directive: flag, then `ODDLINE_LOG`, then the settings file.
pub fn resolve_directive(
    flag: Option<&str>,
    env: Option<&str>,
    configured: Option<&str>,
) -> String {
    [flag, env, configured]
        .into_iter()
        .flatten()
        .find(|directive| !directive.trim().is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

/// Install a stderr subscriber so stdout stays reserved for generated data.
pub fn init_logging(
    format: LogFormat,
    flag: Option<&str>,
    configured: Option<&str>,
) -> Result<(), LoggingError> {
    let env = std::env::var(LOG_ENV).ok();
    let directive = resolve_directive(flag, env.as_deref(), configured);
    let filter = EnvFilter::try_new(&directive)?;

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_timer(UtcTime::rfc_3339());

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init(),
    };
    result.map_err(|err| LoggingError::Init(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment_beats_file() {
        assert_eq!(resolve_directive(Some("trace"), Some("info"), Some("debug")), "trace");
        assert_eq!(resolve_directive(None, Some("info"), Some("debug")), "info");
        assert_eq!(resolve_directive(None, None, Some("debug")), "debug");
        assert_eq!(resolve_directive(None, None, None), "warn");
    }

    #[test]
    fn blank_directives_are_skipped() {
        assert_eq!(resolve_directive(None, Some("  "), Some("debug")), "debug");
        assert_eq!(resolve_directive(Some(""), None, None), "warn");
    }
}
