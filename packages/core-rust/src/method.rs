//! Stable operation names.
//!
//! Each name is used as the call-log `method` tag, the router key and the
//! HTTP path segment, so they must never change once deployed.

pub const UPPERCASE: &str = "uppercase";
pub const COUNT: &str = "count";
