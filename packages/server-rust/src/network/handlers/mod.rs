//! HTTP handler definitions.
//!
//! `AppState` is the shared state carried through axum extractors.

pub mod health;
pub mod operation;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use operation::handle_operation;

use std::sync::Arc;
use std::time::Instant;

use super::lifecycle::ServerLifecycle;
use crate::service::OperationPipeline;

/// Shared application state passed to all axum handlers via `State`.
///
/// Every field is cheap to clone; the pipeline is cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Composed endpoint pipeline.
    pub pipeline: OperationPipeline,
    /// Health state, in-flight tracking and call-id allocation.
    pub lifecycle: Arc<ServerLifecycle>,
    /// Server start time, used for uptime.
    pub start_time: Instant,
}
