//! Call-logging decorator for [`StringService`].
//!
//! [`LoggingService`] implements the same trait as the service it wraps and
//! emits exactly one [`LogRecord`] per call. The record is written from a drop
//! guard, so it is produced on every exit path, including unwinding out of a
//! panicking delegate.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::context::CallContext;
use crate::error::ServiceError;
use crate::logger::{LogRecord, Logger};
use crate::method;
use crate::service::StringService;

// ---------------------------------------------------------------------------
// CallLog guard
// ---------------------------------------------------------------------------

/// Accumulates one call's fields and flushes them to the logger on drop.
struct CallLog<'a> {
    logger: &'a dyn Logger,
    begin: Instant,
    record: LogRecord,
}

impl<'a> CallLog<'a> {
    fn start(logger: &'a dyn Logger, method: &'static str) -> Self {
        Self {
            logger,
            begin: Instant::now(),
            record: LogRecord::new().with("method", method),
        }
    }

    fn set(&mut self, key: &'static str, value: impl Into<Value>) {
        self.record.set(key, value);
    }
}

impl Drop for CallLog<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.record.set("panicked", true);
        }
        let took = u64::try_from(self.begin.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.record.set("took", took);
        // Best-effort: a failing sink must not affect the decorated call.
        let _ = self.logger.log(&self.record);
    }
}

// ---------------------------------------------------------------------------
// LoggingService
// ---------------------------------------------------------------------------

/// Wraps a [`StringService`] and logs every call's inputs, outputs and
/// elapsed nanoseconds without altering results.
pub struct LoggingService<S> {
    logger: Arc<dyn Logger>,
    next: S,
}

impl<S: StringService> LoggingService<S> {
    pub fn new(logger: Arc<dyn Logger>, next: S) -> Self {
        Self { logger, next }
    }
}

impl<S: StringService> StringService for LoggingService<S> {
    fn uppercase(&self, ctx: &CallContext, s: &str) -> Result<String, ServiceError> {
        let mut log = CallLog::start(self.logger.as_ref(), method::UPPERCASE);
        log.set("input", s);
        log.set("output", "");
        log.set("err", "");

        let result = self.next.uppercase(ctx, s);
        match &result {
            Ok(output) => log.set("output", output.as_str()),
            Err(err) => log.set("err", err.to_string()),
        }
        result
    }

    fn count(&self, ctx: &CallContext, s: &str) -> usize {
        let mut log = CallLog::start(self.logger.as_ref(), method::COUNT);
        log.set("input", s);
        log.set("n", 0);

        let n = self.next.count(ctx, s);
        log.set("n", n);
        n
    }
}
