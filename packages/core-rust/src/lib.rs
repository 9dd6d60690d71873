//! `stringsvc` core — string service, call context, wire messages, and the
//! structured call-logging decorator.

pub mod context;
pub mod error;
pub mod logger;
pub mod logging;
pub mod messages;
pub mod method;
pub mod service;

pub use context::CallContext;
pub use error::ServiceError;
pub use logger::{JsonLinesLogger, LogError, LogRecord, Logger, MemoryLogger, TracingLogger};
pub use logging::LoggingService;
pub use messages::{CountRequest, CountResponse, UppercaseRequest, UppercaseResponse};
pub use service::{BasicStringService, StringService};
