//! Request and response values carried through the endpoint pipeline.

use serde::Serialize;
use stringsvc_core::{
    method, CallContext, CountRequest, CountResponse, UppercaseRequest, UppercaseResponse,
};

/// Typed operation variants dispatched through the pipeline.
///
/// Each variant pairs the call context with the decoded request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Uppercase {
        ctx: CallContext,
        payload: UppercaseRequest,
    },
    Count {
        ctx: CallContext,
        payload: CountRequest,
    },
}

impl Operation {
    /// Context of this operation.
    #[must_use]
    pub fn ctx(&self) -> &CallContext {
        match self {
            Self::Uppercase { ctx, .. } | Self::Count { ctx, .. } => ctx,
        }
    }

    /// Stable operation name, used as the router key.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uppercase { .. } => method::UPPERCASE,
            Self::Count { .. } => method::COUNT,
        }
    }
}

/// Response produced by an endpoint.
///
/// Serialized untagged: the wire body is the inner payload only. Domain errors
/// live inside the payload (`UppercaseResponse::err`), never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationResponse {
    Uppercase(UppercaseResponse),
    Count(CountResponse),
}

/// Infrastructure failures raised inside the pipeline.
///
/// Expected domain failures never appear here; endpoints fold them into the
/// response payload.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("unknown operation: {name}")]
    UnknownOperation { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_name_and_ctx() {
        let op = Operation::Count {
            ctx: CallContext::new(9),
            payload: CountRequest { s: "x".to_string() },
        };
        assert_eq!(op.name(), "count");
        assert_eq!(op.ctx().call_id, 9);
    }

    #[test]
    fn response_serializes_untagged() {
        let resp = OperationResponse::Count(CountResponse { v: 5 });
        assert_eq!(serde_json::to_string(&resp).unwrap(), r#"{"v":5}"#);

        let resp = OperationResponse::Uppercase(UppercaseResponse {
            v: "HELLO".to_string(),
            err: String::new(),
        });
        assert_eq!(serde_json::to_string(&resp).unwrap(), r#"{"v":"HELLO"}"#);
    }

    #[test]
    fn error_display() {
        let err = OperationError::UnknownOperation {
            name: "reverse".to_string(),
        };
        assert_eq!(err.to_string(), "unknown operation: reverse");
    }
}
