use std::sync::Arc;

use crate::context::CallContext;
use crate::error::ServiceError;

/// Business operations exposed by the string service.
///
/// Implementations must be safe to call concurrently from many requests.
/// The plain [`BasicStringService`] and the call-logging
/// [`LoggingService`](crate::LoggingService) both implement this trait, so
/// the endpoint layer never knows which one it is holding.
pub trait StringService: Send + Sync {
    /// Map every character of `s` to its uppercase form.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::EmptyInput`] when `s` is empty.
    fn uppercase(&self, ctx: &CallContext, s: &str) -> Result<String, ServiceError>;

    /// Number of characters (Unicode scalar values) in `s`.
    fn count(&self, ctx: &CallContext, s: &str) -> usize;
}

/// Stateless string service.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicStringService;

impl StringService for BasicStringService {
    fn uppercase(&self, _ctx: &CallContext, s: &str) -> Result<String, ServiceError> {
        if s.is_empty() {
            return Err(ServiceError::EmptyInput);
        }
        Ok(s.chars().map(upper_char).collect())
    }

    fn count(&self, _ctx: &CallContext, s: &str) -> usize {
        s.chars().count()
    }
}

/// Single-character uppercase mapping. Characters whose uppercase form
/// expands to several characters (`ß`, `ŉ`) are left as they are.
fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

impl<T: StringService + ?Sized> StringService for Arc<T> {
    fn uppercase(&self, ctx: &CallContext, s: &str) -> Result<String, ServiceError> {
        (**self).uppercase(ctx, s)
    }

    fn count(&self, ctx: &CallContext, s: &str) -> usize {
        (**self).count(ctx, s)
    }
}

impl<T: StringService + ?Sized> StringService for Box<T> {
    fn uppercase(&self, ctx: &CallContext, s: &str) -> Result<String, ServiceError> {
        (**self).uppercase(ctx, s)
    }

    fn count(&self, ctx: &CallContext, s: &str) -> usize {
        (**self).count(ctx, s)
    }
}
