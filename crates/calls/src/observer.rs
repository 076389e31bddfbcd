//! Nurse-side call polling and arrival detection.
//!
//! [`CallObserver`] runs for the lifetime of an authenticated nurse
//! session. Every poll returns the full snapshot of outstanding
//! calls for the nurse; the observer set-differences it against a
//! session-scoped seen-set and forwards only the new arrivals. The
//! seen-set is insert-only and dies with the observer, so a fresh
//! session re-alerts calls still outstanding at reactivation — that
//! is accepted behavior, not a defect.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use wardcall_alerts::AlertDispatcher;
use wardcall_client::{ApiClient, ApiError};
use wardcall_core::types::DbId;
use wardcall_core::Call;

/// Fixed re-fetch interval for outstanding calls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Seams
// ---------------------------------------------------------------------------

/// Source of call snapshots for one nurse.
#[async_trait]
pub trait CallSource: Send + Sync {
    /// The full set of outstanding calls, not a delta.
    async fn active_calls(&self) -> Result<Vec<Call>, ApiError>;
}

#[async_trait]
impl<T: CallSource + ?Sized> CallSource for Arc<T> {
    async fn active_calls(&self) -> Result<Vec<Call>, ApiError> {
        (**self).active_calls().await
    }
}

/// Receiver for newly-detected calls. Fire-and-forget: the observer
/// neither waits on nor learns about delivery outcomes.
pub trait AlertSink: Send + Sync {
    fn alert(&self, call: &Call);
}

impl<T: AlertSink + ?Sized> AlertSink for Arc<T> {
    fn alert(&self, call: &Call) {
        (**self).alert(call)
    }
}

impl AlertSink for AlertDispatcher {
    fn alert(&self, call: &Call) {
        self.dispatch(call)
    }
}

/// [`CallSource`] backed by the backend REST API.
pub struct NurseCalls {
    client: ApiClient,
    nurse_id: DbId,
}

impl NurseCalls {
    pub fn new(client: ApiClient, nurse_id: DbId) -> Self {
        Self { client, nurse_id }
    }
}

#[async_trait]
impl CallSource for NurseCalls {
    async fn active_calls(&self) -> Result<Vec<Call>, ApiError> {
        self.client.active_calls_for_nurse(self.nurse_id).await
    }
}

// ---------------------------------------------------------------------------
// CallObserver
// ---------------------------------------------------------------------------

/// Polling loop with session-scoped de-duplication.
pub struct CallObserver<S, A> {
    source: S,
    sink: A,
    interval: Duration,
    seen: HashSet<DbId>,
}

impl<S: CallSource, A: AlertSink> CallObserver<S, A> {
    /// Create an observer with the default 3 s poll interval and an
    /// empty seen-set.
    pub fn new(source: S, sink: A) -> Self {
        Self {
            source,
            sink,
            interval: POLL_INTERVAL,
            seen: HashSet::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Poll until cancelled. The first fetch fires immediately on
    /// activation; afterwards the loop ticks at the fixed interval.
    /// Cancellation stops all further network activity and alerting.
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(seen = self.seen.len(), "Call observer stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
            }
        }
    }

    /// One poll cycle. Fetch failures are swallowed here — the next
    /// tick is the retry mechanism.
    async fn poll_once(&mut self) {
        let snapshot = match self.source.active_calls().await {
            Ok(calls) => calls,
            Err(e) => {
                tracing::debug!(error = %e, "Call poll failed, retrying next tick");
                return;
            }
        };

        for call in &snapshot {
            // Insert before dispatching: an overlapping poll response
            // must never re-alert an id that is already in flight.
            if self.seen.insert(call.id) {
                tracing::info!(call_id = call.id, "New emergency call detected");
                self.sink.alert(call);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
