//! Bedside call submission with cooldown throttling.
//!
//! The cooldown is a courtesy throttle against accidental repeated
//! taps, not a security control — the backend enforces its own
//! server-side throttle and remains the authority on abuse.
//!
//! State machine: `Idle → Submitting → CoolingDown(deadline) → Idle`,
//! with `Submitting → Idle` on failure so the visitor can retry
//! immediately. A `submit` future dropped mid-flight (timeout
//! wrapper, page navigation) also resets to `Idle`; the button must
//! never stay dead behind a request that no longer exists.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use wardcall_client::{ApiClient, ApiError};
use wardcall_core::types::DbId;
use wardcall_core::CallReceipt;

/// Client-side cooldown after a successful submission.
pub const COOLDOWN: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Seam
// ---------------------------------------------------------------------------

/// Write access to the backend call queue.
#[async_trait]
pub trait CallGateway: Send + Sync {
    async fn create_call(&self, bed_id: DbId) -> Result<CallReceipt, ApiError>;
}

#[async_trait]
impl CallGateway for ApiClient {
    async fn create_call(&self, bed_id: DbId) -> Result<CallReceipt, ApiError> {
        ApiClient::create_call(self, bed_id).await
    }
}

// ---------------------------------------------------------------------------
// CallEmitter
// ---------------------------------------------------------------------------

/// Submission failure, surfaced directly to the bedside page.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Rejected locally; no request was sent.
    #[error("Espera {remaining}s antes de llamar de nuevo")]
    CoolingDown { remaining: u64 },

    /// A submission is already in flight.
    #[error("Ya hay un llamado en curso")]
    InFlight,

    /// The backend rejected the call or the request failed.
    #[error("{}", .0.user_message())]
    Backend(#[from] ApiError),
}

#[derive(Debug, Clone, Copy)]
enum EmitterState {
    Idle,
    Submitting,
    CoolingDown { until: Instant },
}

/// Resets the state to `Idle` unless the submission ran to
/// completion, so a dropped in-flight `submit` future cannot leave
/// the emitter stuck in `Submitting`.
struct ResetOnDrop<'a> {
    state: &'a mut EmitterState,
    armed: bool,
}

impl ResetOnDrop<'_> {
    fn finish(mut self, next: EmitterState) {
        *self.state = next;
        self.armed = false;
    }
}

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            *self.state = EmitterState::Idle;
        }
    }
}

/// One bedside page's call-button state.
#[derive(Debug)]
pub struct CallEmitter {
    state: EmitterState,
    cooldown: Duration,
}

impl CallEmitter {
    pub fn new() -> Self {
        Self {
            state: EmitterState::Idle,
            cooldown: COOLDOWN,
        }
    }

    /// Override the cooldown window (tests, alternate deployments).
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Whether a cooldown window is currently active.
    pub fn is_cooling_down(&self) -> bool {
        self.remaining_secs() > 0
    }

    /// Seconds left in the cooldown window, rounded up. Drives the
    /// countdown the page renders in place of the call button.
    pub fn remaining_secs(&self) -> u64 {
        match self.state {
            EmitterState::CoolingDown { until } => {
                let now = Instant::now();
                if now >= until {
                    0
                } else {
                    (until - now).as_secs_f64().ceil() as u64
                }
            }
            _ => 0,
        }
    }

    /// Submit an emergency call for a bed.
    ///
    /// While cooling down, rejects locally (without any network
    /// traffic) carrying the remaining seconds. On backend failure
    /// the state returns to idle and no cooldown starts, so the
    /// visitor may immediately re-trigger.
    pub async fn submit<G: CallGateway>(
        &mut self,
        gateway: &G,
        bed_id: DbId,
    ) -> Result<CallReceipt, SubmitError> {
        match self.state {
            EmitterState::CoolingDown { until } => {
                let now = Instant::now();
                if now < until {
                    let remaining = (until - now).as_secs_f64().ceil() as u64;
                    return Err(SubmitError::CoolingDown { remaining });
                }
                self.state = EmitterState::Idle;
            }
            EmitterState::Submitting => return Err(SubmitError::InFlight),
            EmitterState::Idle => {}
        }

        self.state = EmitterState::Submitting;
        let cooldown = self.cooldown;
        let guard = ResetOnDrop {
            state: &mut self.state,
            armed: true,
        };
        match gateway.create_call(bed_id).await {
            Ok(receipt) => {
                guard.finish(EmitterState::CoolingDown {
                    until: Instant::now() + cooldown,
                });
                tracing::info!(bed_id, call_id = receipt.id, "Emergency call submitted");
                Ok(receipt)
            }
            Err(e) => {
                guard.finish(EmitterState::Idle);
                tracing::warn!(bed_id, error = %e, "Emergency call submission failed");
                Err(SubmitError::Backend(e))
            }
        }
    }
}

impl Default for CallEmitter {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use assert_matches::assert_matches;

    use super::*;

    #[derive(Default)]
    struct CountingGateway {
        requests: AtomicUsize,
        fail: AtomicBool,
    }

    impl CountingGateway {
        fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CallGateway for CountingGateway {
        async fn create_call(&self, _bed_id: DbId) -> Result<CallReceipt, ApiError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(ApiError::Status {
                    status: 400,
                    message: "Cama no encontrada".into(),
                });
            }
            Ok(serde_json::from_value(serde_json::json!({ "id": 1 })).unwrap())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn successful_submission_starts_cooldown() {
        let gateway = CountingGateway::default();
        let mut emitter = CallEmitter::new();

        emitter.submit(&gateway, 4).await.expect("first call should pass");
        assert!(emitter.is_cooling_down());
        assert_eq!(emitter.remaining_secs(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn second_submission_is_rejected_without_a_request() {
        let gateway = CountingGateway::default();
        let mut emitter = CallEmitter::new();

        emitter.submit(&gateway, 4).await.unwrap();
        let err = emitter.submit(&gateway, 4).await.unwrap_err();

        assert_matches!(err, SubmitError::CoolingDown { remaining } if remaining > 0);
        assert_eq!(gateway.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cooldown_expiry_allows_submission_again() {
        let gateway = CountingGateway::default();
        let mut emitter = CallEmitter::new();

        emitter.submit(&gateway, 4).await.unwrap();
        tokio::time::advance(COOLDOWN).await;

        assert!(!emitter.is_cooling_down());
        emitter.submit(&gateway, 4).await.expect("cooldown elapsed");
        assert_eq!(gateway.request_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_decreases_over_time() {
        let gateway = CountingGateway::default();
        let mut emitter = CallEmitter::new();

        emitter.submit(&gateway, 4).await.unwrap();
        tokio::time::advance(Duration::from_secs(12)).await;
        assert_eq!(emitter.remaining_secs(), 18);
    }

    /// Gateway whose request never resolves, standing in for a
    /// backend that stops answering mid-request.
    struct StallingGateway;

    #[async_trait]
    impl CallGateway for StallingGateway {
        async fn create_call(&self, _bed_id: DbId) -> Result<CallReceipt, ApiError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_submission_leaves_emitter_usable() {
        let mut emitter = CallEmitter::new();

        // The timeout drops the in-flight submit future, the way a
        // page navigation or an outer timeout wrapper would.
        let abandoned =
            tokio::time::timeout(Duration::from_secs(5), emitter.submit(&StallingGateway, 4))
                .await;
        assert!(abandoned.is_err());

        let gateway = CountingGateway::default();
        emitter
            .submit(&gateway, 4)
            .await
            .expect("emitter should accept a new submission after a dropped one");
        assert_eq!(gateway.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn backend_failure_does_not_start_cooldown() {
        let gateway = CountingGateway::default();
        gateway.fail.store(true, Ordering::SeqCst);
        let mut emitter = CallEmitter::new();

        let err = emitter.submit(&gateway, 4).await.unwrap_err();
        assert_matches!(err, SubmitError::Backend(_));
        assert_eq!(err.to_string(), "Cama no encontrada");
        assert!(!emitter.is_cooling_down());

        // Immediate retry is allowed after a failure.
        gateway.fail.store(false, Ordering::SeqCst);
        emitter.submit(&gateway, 4).await.expect("retry should pass");
        assert_eq!(gateway.request_count(), 2);
    }
}
