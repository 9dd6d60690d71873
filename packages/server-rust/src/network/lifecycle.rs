//! Server lifecycle: health state, in-flight call tracking and call-id
//! allocation shared by every HTTP handler.
//!
//! State transitions are lock-free (`ArcSwap`); in-flight tracking uses an
//! atomic counter decremented by an RAII guard.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use stringsvc_core::CallContext;
use tokio::sync::watch;

/// Server health state.
///
/// State machine: Starting -> Ready -> Draining -> Stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// Server is initializing, not yet accepting calls.
    Starting,
    /// Server is accepting and processing calls.
    Ready,
    /// Shutdown initiated, in-flight calls are finishing.
    Draining,
    /// All calls drained, server has stopped.
    Stopped,
}

impl HealthState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Ready => "ready",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }
}

/// Tracks health, in-flight calls and issues call contexts.
#[derive(Debug)]
pub struct ServerLifecycle {
    shutdown_signal: watch::Sender<bool>,
    health_state: ArcSwap<HealthState>,
    in_flight: Arc<AtomicU64>,
    next_call_id: AtomicU64,
}

impl ServerLifecycle {
    /// Creates a lifecycle in the `Starting` state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            shutdown_signal: tx,
            health_state: ArcSwap::from_pointee(HealthState::Starting),
            in_flight: Arc::new(AtomicU64::new(0)),
            next_call_id: AtomicU64::new(1),
        }
    }

    pub fn set_ready(&self) {
        self.health_state.store(Arc::new(HealthState::Ready));
    }

    /// Moves to `Draining` and notifies every shutdown receiver, which makes
    /// a running [`NetworkModule::serve`](super::NetworkModule::serve) stop
    /// accepting connections.
    pub fn trigger_shutdown(&self) {
        self.health_state.store(Arc::new(HealthState::Draining));
        // Receivers may all be gone.
        let _ = self.shutdown_signal.send(true);
    }

    /// Subscribes to the shutdown broadcast. The value turns `true` once
    /// shutdown has been triggered.
    #[must_use]
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_signal.subscribe()
    }

    #[must_use]
    pub fn health_state(&self) -> HealthState {
        **self.health_state.load()
    }

    /// Allocates a fresh call context for one inbound request.
    pub fn new_call(&self, request_id: Option<String>) -> CallContext {
        let ctx = CallContext::new(self.next_call_id.fetch_add(1, Ordering::Relaxed));
        match request_id {
            Some(id) => ctx.with_request_id(id),
            None => ctx,
        }
    }

    /// Counts a call as in flight until the returned guard is dropped,
    /// including when the handler unwinds.
    #[must_use]
    pub fn in_flight_guard(&self) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    #[must_use]
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Waits until no call is in flight, up to `timeout`.
    ///
    /// Returns `true` and moves to `Stopped` when drained; returns `false`
    /// and stays `Draining` on timeout.
    pub async fn wait_for_drain(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.in_flight_count() == 0 {
                self.health_state.store(Arc::new(HealthState::Stopped));
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Default for ServerLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the in-flight counter on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    in_flight: Arc<AtomicU64>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
