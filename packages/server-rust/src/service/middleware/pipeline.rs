//! Pipeline composition: wraps the router in the operation middleware stack.

use tower::util::BoxCloneSyncService;
use tower::ServiceBuilder;

use super::span::OperationSpanLayer;
use crate::service::operation::{Operation, OperationError, OperationResponse};
use crate::service::router::OperationRouter;

/// The fully composed, type-erased operation pipeline.
///
/// `Clone + Send + Sync`, so it can live in shared HTTP state and be cloned
/// per request without any lock.
pub type OperationPipeline = BoxCloneSyncService<Operation, OperationResponse, OperationError>;

/// Build the operation pipeline by wrapping the `OperationRouter` with
/// middleware layers.
///
/// Layer order (outermost to innermost):
/// 1. `OperationSpanLayer` -- span with timing and outcome
/// 2. `OperationRouter` -- dispatch to the endpoint by operation name
#[must_use]
pub fn build_operation_pipeline(router: OperationRouter) -> OperationPipeline {
    let svc = ServiceBuilder::new()
        .layer(OperationSpanLayer)
        .service(router);
    BoxCloneSyncService::new(svc)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
