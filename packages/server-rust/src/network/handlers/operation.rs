//! Operation handler: decode -> pipeline -> encode for one bound route.

use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tower::ServiceExt;
use tracing::{debug, warn};

use super::AppState;
use crate::network::binding::{encode_response, HttpBinding, TransportError};
use crate::network::middleware::REQUEST_ID_HEADER;

/// Runs one HTTP request through the binding's decoder, the operation
/// pipeline and the shared encoder.
///
/// Decode failures return 400 without touching the pipeline. Domain errors
/// are already inside the encoded payload and return 200.
pub async fn handle_operation(
    state: AppState,
    binding: HttpBinding,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match dispatch(&state, binding, &headers, &body).await {
        Ok(encoded) => ([(header::CONTENT_TYPE, "application/json")], encoded).into_response(),
        Err(err) => {
            match &err {
                TransportError::Decode(e) => debug!(path = binding.path, error = %e, "rejected request"),
                other => warn!(path = binding.path, error = %other, "request failed"),
            }
            err.into_response()
        }
    }
}

async fn dispatch(
    state: &AppState,
    binding: HttpBinding,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Vec<u8>, TransportError> {
    let _in_flight = state.lifecycle.in_flight_guard();

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let ctx = state.lifecycle.new_call(request_id);

    let op = (binding.decode)(ctx, body)?;
    let response = state.pipeline.clone().oneshot(op).await?;
    Ok(encode_response(&response)?)
}
