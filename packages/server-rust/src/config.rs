//! Command-line and environment configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::network::NetworkConfig;
use crate::telemetry::LogFormat;

/// Where the per-call service log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CallLogSink {
    /// One `tracing` event per call, subject to `--log-filter`.
    Tracing,
    /// One JSON object per line on stderr, independent of `tracing`.
    Stderr,
}

/// `stringsvc` server options.
#[derive(Debug, Clone, Parser)]
#[command(name = "stringsvc", version, about = "String service over HTTP")]
pub struct ServerArgs {
    /// Address to bind.
    #[arg(long, env = "STRINGSVC_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (0 picks a free port).
    #[arg(long, env = "STRINGSVC_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Per-request timeout in seconds.
    #[arg(long, env = "STRINGSVC_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// `tracing` filter directive, e.g. `info,stringsvc::calls=debug`.
    #[arg(long, env = "STRINGSVC_LOG", default_value = "info")]
    pub log_filter: String,

    /// Diagnostic log output format.
    #[arg(long, env = "STRINGSVC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Sink for per-call service log records.
    #[arg(long, env = "STRINGSVC_CALL_LOG", value_enum, default_value_t = CallLogSink::Tracing)]
    pub call_log: CallLogSink,
}

impl ServerArgs {
    #[must_use]
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..NetworkConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = ServerArgs::try_parse_from(["stringsvc"]).unwrap();
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 8080);
        assert_eq!(args.log_format, LogFormat::Pretty);
        assert_eq!(args.call_log, CallLogSink::Tracing);
    }

    #[test]
    fn flags_override_defaults() {
        let args = ServerArgs::try_parse_from([
            "stringsvc",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--request-timeout-secs",
            "5",
            "--log-format",
            "json",
            "--call-log",
            "stderr",
        ])
        .unwrap();
        assert_eq!(args.call_log, CallLogSink::Stderr);
        assert_eq!(args.log_format, LogFormat::Json);

        let net = args.network_config();
        assert_eq!(net.bind_addr(), "127.0.0.1:9000");
        assert_eq!(net.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_unknown_sink() {
        assert!(ServerArgs::try_parse_from(["stringsvc", "--call-log", "syslog"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        ServerArgs::command().debug_assert();
    }
}
