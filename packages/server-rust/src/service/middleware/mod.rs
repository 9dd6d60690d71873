//! Tower middleware layers for the operation pipeline.
//!
//! - [`span`]: Per-operation `tracing` span with timing and outcome
//! - [`pipeline`]: Composes the layers over the router into one service

pub mod pipeline;
pub mod span;

pub use pipeline::{build_operation_pipeline, OperationPipeline};
pub use span::OperationSpanLayer;
