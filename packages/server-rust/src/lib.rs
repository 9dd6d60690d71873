//! `stringsvc` server — tower endpoint pipeline over the string service,
//! bound to HTTP with axum.

pub mod config;
pub mod network;
pub mod service;
pub mod telemetry;

pub use config::{CallLogSink, ServerArgs};
pub use network::{NetworkConfig, NetworkModule};
pub use service::{build_operation_pipeline, string_router, OperationPipeline};
