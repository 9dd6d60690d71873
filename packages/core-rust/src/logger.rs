//! Structured key-value logger contract and the sinks shipped with it.
//!
//! A [`Logger`] accepts an ordered set of key-value pairs and may fail. The
//! logging decorator treats every failure as best-effort and discards it.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// LogRecord
// ---------------------------------------------------------------------------

/// Ordered key-value pairs making up one log entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    fields: Vec<(&'static str, Value)>,
}

impl LogRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, builder style.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field, replacing an existing value for the same key in place so
    /// the original field order is kept.
    pub fn set(&mut self, key: &'static str, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as a JSON object. Later duplicates cannot occur since `set`
    /// replaces in place.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        Value::Object(map)
    }
}

// ---------------------------------------------------------------------------
// Logger trait
// ---------------------------------------------------------------------------

/// Errors returned by a [`Logger`] sink.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("log write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("log record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Process-wide structured logger.
///
/// Shared read-only across concurrent calls; implementations own whatever
/// synchronization their sink needs.
pub trait Logger: Send + Sync {
    /// Emit one record.
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the sink cannot accept the record.
    fn log(&self, record: &LogRecord) -> Result<(), LogError>;
}

impl<T: Logger + ?Sized> Logger for Arc<T> {
    fn log(&self, record: &LogRecord) -> Result<(), LogError> {
        (**self).log(record)
    }
}

// ---------------------------------------------------------------------------
// TracingLogger
// ---------------------------------------------------------------------------

/// Forwards every record to `tracing` as a single INFO event on the
/// `stringsvc::calls` target. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, record: &LogRecord) -> Result<(), LogError> {
        let method = record.get("method").and_then(Value::as_str).unwrap_or("");
        tracing::info!(
            target: "stringsvc::calls",
            method = method,
            record = %record.to_json(),
            "service call"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonLinesLogger
// ---------------------------------------------------------------------------

/// Writes one JSON object per line to the wrapped writer.
pub struct JsonLinesLogger<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesLogger<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the logger and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesLogger<std::io::Stderr> {
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> Logger for JsonLinesLogger<W> {
    fn log(&self, record: &LogRecord) -> Result<(), LogError> {
        let mut line = serde_json::to_vec(&record.to_json())?;
        line.push(b'\n');
        let mut writer = self.writer.lock();
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryLogger
// ---------------------------------------------------------------------------

/// Keeps every record in memory. Cloning shares the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records emitted so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, record: &LogRecord) -> Result<(), LogError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}
