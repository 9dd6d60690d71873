//! Operation pipeline: endpoints, routing and middleware.
//!
//! 1. **Operations** (`operation`): request/response values and pipeline errors
//! 2. **Endpoints** (`endpoint`): one `tower::Service<Operation>` per `StringService` method
//! 3. **Routing** (`router`): dispatch to endpoints by operation name
//! 4. **Middleware** (`middleware`): Tower layers composed over the router

pub mod endpoint;
pub mod middleware;
pub mod operation;
pub mod router;

// Re-export key types for convenient access.
pub use endpoint::{make_count_endpoint, make_uppercase_endpoint, CountEndpoint, UppercaseEndpoint};
pub use middleware::{build_operation_pipeline, OperationPipeline};
pub use operation::{Operation, OperationError, OperationResponse};
pub use router::{string_router, OperationRouter};
