//! HTTP transport: configuration, bindings, handlers, middleware and the
//! server lifecycle.

pub mod binding;
pub mod config;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod module;

pub use binding::{bindings, DecodeError, EncodeError, HttpBinding, TransportError};
pub use config::NetworkConfig;
pub use handlers::AppState;
pub use lifecycle::{HealthState, InFlightGuard, ServerLifecycle};
pub use module::NetworkModule;
