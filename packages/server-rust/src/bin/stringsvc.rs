//! `stringsvc` binary: wires configuration, telemetry, the logged string
//! service and the HTTP transport, then serves until Ctrl-C.

use std::sync::Arc;

use clap::Parser;
use stringsvc_core::{
    BasicStringService, JsonLinesLogger, Logger, LoggingService, StringService, TracingLogger,
};
use stringsvc_server::{
    build_operation_pipeline, string_router, telemetry, CallLogSink, NetworkModule, ServerArgs,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    telemetry::init(&args.log_filter, args.log_format)?;

    let logger: Arc<dyn Logger> = match args.call_log {
        CallLogSink::Tracing => Arc::new(TracingLogger),
        CallLogSink::Stderr => Arc::new(JsonLinesLogger::stderr()),
    };
    let svc: Arc<dyn StringService> = Arc::new(LoggingService::new(logger, BasicStringService));
    let pipeline = build_operation_pipeline(string_router(svc));

    let mut module = NetworkModule::new(args.network_config(), pipeline);
    let port = module.start().await?;
    info!(port, "stringsvc listening");

    module
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl-C");
            }
            info!("shutdown signal received");
        })
        .await
}
