//! Endpoint adapters: expose each `StringService` method as a uniform
//! `tower::Service<Operation>`.
//!
//! Endpoints never fail for expected domain errors. A failed `uppercase` is
//! returned as `Ok` with the error description in the payload's `err` field,
//! so the transport always runs its encode step and observers see domain
//! errors as data.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use stringsvc_core::{CountResponse, StringService, UppercaseResponse};
use tower::Service;

use super::operation::{Operation, OperationError, OperationResponse};

pub type BoxedFuture =
    Pin<Box<dyn Future<Output = Result<OperationResponse, OperationError>> + Send>>;

// ---------------------------------------------------------------------------
// UppercaseEndpoint
// ---------------------------------------------------------------------------

/// Endpoint for [`StringService::uppercase`].
#[derive(Clone)]
pub struct UppercaseEndpoint {
    svc: Arc<dyn StringService>,
}

/// Build the `uppercase` endpoint over the given service.
#[must_use]
pub fn make_uppercase_endpoint(svc: Arc<dyn StringService>) -> UppercaseEndpoint {
    UppercaseEndpoint { svc }
}

impl Service<Operation> for UppercaseEndpoint {
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = BoxedFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let (ctx, payload) = match op {
            Operation::Uppercase { ctx, payload } => (ctx, payload),
            other => unreachable!("uppercase endpoint received {} operation", other.name()),
        };
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let resp = match svc.uppercase(&ctx, &payload.s) {
                Ok(v) => UppercaseResponse { v, err: String::new() },
                Err(err) => UppercaseResponse {
                    v: String::new(),
                    err: err.to_string(),
                },
            };
            Ok(OperationResponse::Uppercase(resp))
        })
    }
}

// ---------------------------------------------------------------------------
// CountEndpoint
// ---------------------------------------------------------------------------

/// Endpoint for [`StringService::count`].
#[derive(Clone)]
pub struct CountEndpoint {
    svc: Arc<dyn StringService>,
}

/// Build the `count` endpoint over the given service.
#[must_use]
pub fn make_count_endpoint(svc: Arc<dyn StringService>) -> CountEndpoint {
    CountEndpoint { svc }
}

impl Service<Operation> for CountEndpoint {
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = BoxedFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let (ctx, payload) = match op {
            Operation::Count { ctx, payload } => (ctx, payload),
            other => unreachable!("count endpoint received {} operation", other.name()),
        };
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let v = svc.count(&ctx, &payload.s);
            Ok(OperationResponse::Count(CountResponse { v }))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use stringsvc_core::{
        BasicStringService, CallContext, CountRequest, LoggingService, MemoryLogger,
        UppercaseRequest,
    };
    use tower::ServiceExt;

    use super::*;

    fn basic() -> Arc<dyn StringService> {
        Arc::new(BasicStringService)
    }

    fn uppercase_op(s: &str) -> Operation {
        Operation::Uppercase {
            ctx: CallContext::new(1),
            payload: UppercaseRequest { s: s.to_string() },
        }
    }

    fn count_op(s: &str) -> Operation {
        Operation::Count {
            ctx: CallContext::new(1),
            payload: CountRequest { s: s.to_string() },
        }
    }

    #[tokio::test]
    async fn uppercase_success() {
        let resp = make_uppercase_endpoint(basic())
            .oneshot(uppercase_op("hello"))
            .await
            .unwrap();
        assert_eq!(
            resp,
            OperationResponse::Uppercase(UppercaseResponse {
                v: "HELLO".to_string(),
                err: String::new(),
            })
        );
    }

    #[tokio::test]
    async fn uppercase_domain_error_is_data() {
        let resp = make_uppercase_endpoint(basic())
            .oneshot(uppercase_op(""))
            .await
            .expect("domain errors must not fail the endpoint");
        assert_eq!(
            resp,
            OperationResponse::Uppercase(UppercaseResponse {
                v: String::new(),
                err: "empty string".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn count_wraps_value() {
        let resp = make_count_endpoint(basic())
            .oneshot(count_op("hello"))
            .await
            .unwrap();
        assert_eq!(resp, OperationResponse::Count(CountResponse { v: 5 }));

        let resp = make_count_endpoint(basic()).oneshot(count_op("")).await.unwrap();
        assert_eq!(resp, OperationResponse::Count(CountResponse { v: 0 }));
    }

    #[tokio::test]
    async fn decorated_service_is_observed_through_endpoint() {
        let logger = MemoryLogger::new();
        let svc: Arc<dyn StringService> =
            Arc::new(LoggingService::new(Arc::new(logger.clone()), BasicStringService));

        let _ = make_uppercase_endpoint(Arc::clone(&svc))
            .oneshot(uppercase_op(""))
            .await
            .unwrap();
        let _ = make_count_endpoint(svc).oneshot(count_op("ab")).await.unwrap();

        assert_eq!(logger.len(), 2);
    }

    #[tokio::test]
    async fn service_runs_when_future_is_polled() {
        let logger = MemoryLogger::new();
        let svc: Arc<dyn StringService> =
            Arc::new(LoggingService::new(Arc::new(logger.clone()), BasicStringService));

        let mut endpoint = make_count_endpoint(svc);
        let fut = endpoint.call(count_op("abc"));
        assert!(logger.is_empty());
        fut.await.unwrap();
        assert_eq!(logger.len(), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "uppercase endpoint received count operation")]
    async fn mismatched_operation_is_fatal() {
        let _ = make_uppercase_endpoint(basic()).oneshot(count_op("x")).await;
    }
}
