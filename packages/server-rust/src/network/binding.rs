//! HTTP transport binding: per-operation decode, shared encode, and the static
//! path table.
//!
//! Decode and encode are pure functions over bytes. A decode failure aborts the
//! request before it reaches the pipeline; an encode failure can only come
//! from a serializer bug since responses carry domain errors as strings.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use stringsvc_core::{method, CallContext, CountRequest, UppercaseRequest};

use crate::service::{Operation, OperationError, OperationResponse};

/// Decodes a request body into the operation it is bound to.
pub type DecodeFn = fn(CallContext, &[u8]) -> Result<Operation, DecodeError>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Malformed or unparseable request body.
#[derive(Debug, thiserror::Error)]
#[error("invalid {operation} request body: {source}")]
pub struct DecodeError {
    pub operation: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Response value could not be serialized.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode response: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Every failure that surfaces as a transport-level HTTP error.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Operation(#[from] OperationError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl TransportError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::Operation(OperationError::UnknownOperation { .. }) => StatusCode::NOT_FOUND,
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TransportError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Decode / encode
// ---------------------------------------------------------------------------

/// Reads the first JSON value of `body`. Bytes after it are not examined and
/// a `null` value yields the default request.
fn read_first<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_slice(body);
    Ok(Option::<T>::deserialize(&mut de)?.unwrap_or_default())
}

/// Decodes `{"s": ...}` into an `uppercase` operation.
///
/// # Errors
///
/// Returns [`DecodeError`] for an empty body, malformed JSON or a non-string
/// `s`.
pub fn decode_uppercase_request(ctx: CallContext, body: &[u8]) -> Result<Operation, DecodeError> {
    let payload: UppercaseRequest = read_first(body).map_err(|source| DecodeError {
        operation: method::UPPERCASE,
        source,
    })?;
    Ok(Operation::Uppercase { ctx, payload })
}

/// Decodes `{"s": ...}` into a `count` operation.
///
/// # Errors
///
/// Same conditions as [`decode_uppercase_request`].
pub fn decode_count_request(ctx: CallContext, body: &[u8]) -> Result<Operation, DecodeError> {
    let payload: CountRequest = read_first(body).map_err(|source| DecodeError {
        operation: method::COUNT,
        source,
    })?;
    Ok(Operation::Count { ctx, payload })
}

/// Encodes any operation response as its JSON payload.
///
/// # Errors
///
/// Returns [`EncodeError`] if serialization fails.
pub fn encode_response(response: &OperationResponse) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(response)?)
}

// ---------------------------------------------------------------------------
// Path table
// ---------------------------------------------------------------------------

/// One `POST` route paired with the decoder feeding its endpoint.
#[derive(Clone, Copy)]
pub struct HttpBinding {
    pub path: &'static str,
    pub operation: &'static str,
    pub decode: DecodeFn,
}

/// Static bindings for every exposed operation.
#[must_use]
pub fn bindings() -> [HttpBinding; 2] {
    [
        HttpBinding {
            path: "/uppercase",
            operation: method::UPPERCASE,
            decode: decode_uppercase_request,
        },
        HttpBinding {
            path: "/count",
            operation: method::COUNT,
            decode: decode_count_request,
        },
    ]
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use stringsvc_core::{CountResponse, UppercaseResponse};

    use super::*;

    #[test]
    fn decode_uppercase_body() {
        let op = decode_uppercase_request(CallContext::new(1), br#"{"s":"hello"}"#).unwrap();
        assert_eq!(
            op,
            Operation::Uppercase {
                ctx: CallContext::new(1),
                payload: UppercaseRequest {
                    s: "hello".to_string()
                },
            }
        );
    }

    #[test]
    fn decode_missing_field_as_empty() {
        let op = decode_count_request(CallContext::new(1), b"{}").unwrap();
        assert!(matches!(op, Operation::Count { payload, .. } if payload.s.is_empty()));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = decode_uppercase_request(CallContext::new(1), b"{not json").unwrap_err();
        assert_eq!(err.operation, "uppercase");
        assert!(err.to_string().starts_with("invalid uppercase request body"));

        assert!(decode_count_request(CallContext::new(1), b"").is_err());
        assert!(decode_count_request(CallContext::new(1), b"  \n").is_err());
        assert!(decode_count_request(CallContext::new(1), br#"{"s":1}"#).is_err());
        assert!(decode_count_request(CallContext::new(1), b"[1]").is_err());
    }

    #[test]
    fn decode_reads_only_first_value() {
        let op = decode_uppercase_request(CallContext::new(1), b"{\"s\":\"hi\"}\n{\"s\":\"x\"}").unwrap();
        assert!(matches!(op, Operation::Uppercase { payload, .. } if payload.s == "hi"));

        let op = decode_count_request(CallContext::new(1), br#"{"s":"a"} x"#).unwrap();
        assert!(matches!(op, Operation::Count { payload, .. } if payload.s == "a"));
    }

    #[test]
    fn decode_null_body_as_empty_request() {
        let op = decode_uppercase_request(CallContext::new(1), b"null").unwrap();
        assert!(matches!(op, Operation::Uppercase { payload, .. } if payload.s.is_empty()));
    }

    #[test]
    fn decode_capitalized_field_name() {
        let op = decode_uppercase_request(CallContext::new(1), br#"{"S":"hello"}"#).unwrap();
        assert!(matches!(op, Operation::Uppercase { payload, .. } if payload.s == "hello"));
    }

    #[test]
    fn encode_payloads() {
        let ok = OperationResponse::Uppercase(UppercaseResponse {
            v: "HELLO".to_string(),
            err: String::new(),
        });
        assert_eq!(encode_response(&ok).unwrap(), br#"{"v":"HELLO"}"#);

        let failed = OperationResponse::Uppercase(UppercaseResponse {
            v: String::new(),
            err: "empty string".to_string(),
        });
        assert_eq!(encode_response(&failed).unwrap(), br#"{"v":"","err":"empty string"}"#);

        let count = OperationResponse::Count(CountResponse { v: 5 });
        assert_eq!(encode_response(&count).unwrap(), br#"{"v":5}"#);
    }

    #[test]
    fn transport_error_status_codes() {
        let decode = decode_count_request(CallContext::new(1), b"[").unwrap_err();
        assert_eq!(TransportError::from(decode).status(), StatusCode::BAD_REQUEST);

        let unknown = OperationError::UnknownOperation {
            name: "x".to_string(),
        };
        assert_eq!(TransportError::from(unknown).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bindings_cover_every_operation() {
        let table = bindings();
        let mut ops: Vec<_> = table.iter().map(|b| b.operation).collect();
        ops.sort_unstable();
        assert_eq!(ops, [method::COUNT, method::UPPERCASE]);
        for binding in &table {
            assert_eq!(binding.path, format!("/{}", binding.operation));
        }
    }

    proptest! {
        #[test]
        fn decode_arbitrary_bytes_never_panics(body in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = decode_uppercase_request(CallContext::new(1), &body);
            let _ = decode_count_request(CallContext::new(1), &body);
        }

        #[test]
        fn decode_preserves_input_string(s in ".{0,32}") {
            let body = serde_json::to_vec(&serde_json::json!({ "s": s.clone() })).unwrap();
            let op = decode_count_request(CallContext::new(1), &body).unwrap();
            let expected = Operation::Count {
                ctx: CallContext::new(1),
                payload: CountRequest { s },
            };
            prop_assert_eq!(op, expected);
        }
    }
}
