//! Operation routing: dispatches an `Operation` to its endpoint by name.

use std::collections::HashMap;
use std::sync::Arc;
use std::task::{Context, Poll};

use stringsvc_core::{method, StringService};
use tower::util::BoxCloneSyncService;
use tower::Service;

use super::endpoint::{make_count_endpoint, make_uppercase_endpoint, BoxedFuture};
use super::operation::{Operation, OperationError, OperationResponse};

/// A type-erased, cloneable endpoint.
pub type BoxedEndpoint = BoxCloneSyncService<Operation, OperationResponse, OperationError>;

// ---------------------------------------------------------------------------
// OperationRouter
// ---------------------------------------------------------------------------

/// Routes `Operation` values to the endpoint registered under
/// [`Operation::name`].
///
/// Operations with no registered endpoint return
/// `OperationError::UnknownOperation`. Cloning is cheap relative to a request
/// and shares no mutable state, so each request works on its own clone.
#[derive(Clone, Default)]
pub struct OperationRouter {
    endpoints: HashMap<&'static str, BoxedEndpoint>,
}

impl OperationRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint under the given operation name, replacing any
    /// previous registration.
    pub fn register<S>(&mut self, name: &'static str, endpoint: S)
    where
        S: Service<Operation, Response = OperationResponse, Error = OperationError>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        self.endpoints.insert(name, BoxCloneSyncService::new(endpoint));
    }
}

impl Service<Operation> for OperationRouter {
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = BoxedFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        for endpoint in self.endpoints.values_mut() {
            match endpoint.poll_ready(cx) {
                Poll::Ready(Ok(())) => {}
                Poll::Ready(Err(e)) => return Poll::Ready(Err(e)),
                Poll::Pending => return Poll::Pending,
            }
        }
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let name = op.name();
        match self.endpoints.get_mut(name) {
            Some(endpoint) => endpoint.call(op),
            None => Box::pin(async move {
                Err(OperationError::UnknownOperation {
                    name: name.to_string(),
                })
            }),
        }
    }
}

/// Router with both string endpoints registered over `svc`.
#[must_use]
pub fn string_router(svc: Arc<dyn StringService>) -> OperationRouter {
    let mut router = OperationRouter::new();
    router.register(method::UPPERCASE, make_uppercase_endpoint(Arc::clone(&svc)));
    router.register(method::COUNT, make_count_endpoint(svc));
    router
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
