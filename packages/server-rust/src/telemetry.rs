//! Global `tracing` subscriber setup.

use std::sync::OnceLock;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Diagnostic log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(String),
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global subscriber on first call; later calls are no-ops.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparseable filter (checked on
/// every call) and [`TelemetryError::Install`] if a subscriber not installed
/// here is already global.
pub fn init(filter: &str, format: LogFormat) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(filter).map_err(|e| TelemetryError::Filter(e.to_string()))?;
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| TelemetryError::Install(e.to_string()))?;

    let _ = INSTALLED.set(());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_rejected() {
        let err = init("stringsvc=verbose", LogFormat::Pretty).unwrap_err();
        assert!(matches!(err, TelemetryError::Filter(_)));
    }

    #[test]
    fn init_is_idempotent() {
        // Whichever test installs first wins; a second call must still succeed.
        let first = init("info", LogFormat::Json);
        if first.is_ok() {
            assert!(init("debug", LogFormat::Pretty).is_ok());
        }
    }
}
