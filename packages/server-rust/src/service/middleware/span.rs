//! Span middleware for operations.
//!
//! Wraps every endpoint call in an INFO `operation` span and records its
//! duration and outcome. This is pipeline-level tracing; the per-call business
//! log record comes from `stringsvc_core::LoggingService`.

use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{info_span, Instrument};

use crate::service::endpoint::BoxedFuture;
use crate::service::operation::{Operation, OperationError, OperationResponse};

// ---------------------------------------------------------------------------
// OperationSpanLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments operations with a `tracing` span.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationSpanLayer;

impl<S> Layer<S> for OperationSpanLayer {
    type Service = OperationSpanService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OperationSpanService { inner }
    }
}

// ---------------------------------------------------------------------------
// OperationSpanService
// ---------------------------------------------------------------------------

/// Service wrapper that records operation duration and outcome on its span.
#[derive(Debug, Clone)]
pub struct OperationSpanService<S> {
    inner: S,
}

impl<S> Service<Operation> for OperationSpanService<S>
where
    S: Service<Operation, Response = OperationResponse, Error = OperationError> + Send,
    S::Future: Send + 'static,
{
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = BoxedFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let operation = op.name();
        let call_id = op.ctx().call_id;

        let span = info_span!(
            "operation",
            operation = operation,
            call_id = call_id,
            duration_us = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        let fut = self.inner.call(op);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = fut.await;
                let duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

                let outcome = match &result {
                    Ok(OperationResponse::Uppercase(resp)) if resp.is_err() => "domain_error",
                    Ok(_) => "ok",
                    Err(_) => "error",
                };

                let span = tracing::Span::current();
                span.record("duration_us", duration_us);
                span.record("outcome", outcome);

                match &result {
                    Ok(_) => tracing::debug!(operation, call_id, duration_us, outcome, "operation complete"),
                    Err(err) => tracing::warn!(operation, call_id, duration_us, error = %err, "operation failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
