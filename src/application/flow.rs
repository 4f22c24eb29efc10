//! The contact flow: one end-to-end submission attempt.
//!
//! Sequencing contract per attempt: consult the guard, verify the address,
//! send the message, persist the outcome. Each step only runs if the
//! previous one succeeded, and persisted state changes on exactly two paths:
//! a failed validation and a successful send. Transient service outages
//! never count against the user.

use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, EmailRelay, EmailVerifier, KeyValue, Verdict};
use crate::application::store::GuardStateStore;
use crate::domain::guard::{
    CooldownKind, GuardConfig, GuardConfigError, GuardDecision, SubmissionGuard,
};
use crate::domain::message::Message;
use crate::infrastructure::clock::SystemClock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Terminal outcome of one submission attempt.
///
/// Every variant is an expected branch of normal operation for a
/// public-facing form; none represents a programming error, so outcomes are
/// returned as values rather than raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The message was handed to the relay.
    Sent,
    /// The guard blocked the attempt before any external call was made.
    RejectedByGuard {
        /// Which cooldown blocked the attempt.
        reason: CooldownKind,
        /// Milliseconds until the cooldown expires.
        remaining_ms: i64,
    },
    /// The verifier classified the address as undeliverable. Costs a strike.
    RejectedByValidation {
        /// Verifier-reported reason, for user-facing copy.
        reason: String,
    },
    /// The verification service could not be reached. Costs nothing.
    ValidationServiceUnavailable,
    /// The relay failed to accept the message. Costs nothing.
    SendFailed {
        /// Relay-reported failure description.
        reason: String,
    },
}

impl SubmissionResult {
    /// Check if the attempt ended in a successful send.
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmissionResult::Sent)
    }
}

/// Orchestrates submission attempts and keeps the persisted guard state
/// consistent with their outcomes.
///
/// `submit` takes `&mut self`: a flow handle can run one attempt at a time,
/// which is the in-core counterpart to the UI's in-flight flag. The
/// read-only [`peek_status`](ContactFlow::peek_status) stays `&self` so the
/// presentation layer can poll it freely, e.g. to render a countdown.
pub struct ContactFlow<K, V, R>
where
    K: KeyValue,
    V: EmailVerifier,
    R: EmailRelay,
{
    store: GuardStateStore<K>,
    verifier: V,
    relay: R,
    clock: Arc<dyn Clock>,
    guard: SubmissionGuard,
    metrics: Metrics,
}

impl<K, V, R> ContactFlow<K, V, R>
where
    K: KeyValue,
    V: EmailVerifier,
    R: EmailRelay,
{
    /// Create a flow with the system clock and default guard policy.
    pub fn new(kv: K, verifier: V, relay: R) -> Self {
        Self {
            store: GuardStateStore::new(kv),
            verifier,
            relay,
            clock: Arc::new(SystemClock::new()),
            guard: SubmissionGuard::default(),
            metrics: Metrics::new(),
        }
    }

    /// Start building a flow with a custom clock, policy, or state key.
    pub fn builder(kv: K, verifier: V, relay: R) -> ContactFlowBuilder<K, V, R> {
        ContactFlowBuilder {
            kv,
            verifier,
            relay,
            clock: Arc::new(SystemClock::new()),
            config: GuardConfig::default(),
            state_key: None,
        }
    }

    /// Run one submission attempt end to end.
    pub fn submit(&mut self, candidate_email: &str, message: &Message) -> SubmissionResult {
        let now = self.clock.now_ms();
        let state = self.store.load();

        match self.guard.evaluate(&state, now) {
            GuardDecision::Allowed => {}
            GuardDecision::BlockedBySuccessCooldown { remaining_ms } => {
                debug!(remaining_ms, "attempt blocked by success cooldown");
                self.metrics.record_blocked();
                return SubmissionResult::RejectedByGuard {
                    reason: CooldownKind::Success,
                    remaining_ms,
                };
            }
            GuardDecision::BlockedByValidationCooldown { remaining_ms } => {
                debug!(remaining_ms, "attempt blocked by validation cooldown");
                self.metrics.record_blocked();
                return SubmissionResult::RejectedByGuard {
                    reason: CooldownKind::Validation,
                    remaining_ms,
                };
            }
        }

        match self.verifier.verify(candidate_email) {
            Ok(Verdict::Deliverable) => {}
            Ok(Verdict::Undeliverable { reason }) => {
                let mut next = state;
                next.record_validation_failure(now);
                self.store.save(&next);
                warn!(
                    strikes = next.failed_validations,
                    %reason,
                    "address failed validation"
                );
                self.metrics.record_validation_failure();
                return SubmissionResult::RejectedByValidation { reason };
            }
            Err(err) => {
                // Failure to verify says nothing about the address; no strike.
                warn!(error = %err, "verification service unavailable");
                self.metrics.record_service_error();
                return SubmissionResult::ValidationServiceUnavailable;
            }
        }

        match self.relay.send(message) {
            Ok(()) => {
                let mut next = state;
                next.record_success(now);
                self.store.save(&next);
                info!("message handed to relay");
                self.metrics.record_sent();
                SubmissionResult::Sent
            }
            Err(err) => {
                // A relay outage does not count against the user.
                warn!(reason = %err.reason, "relay failed to accept message");
                self.metrics.record_service_error();
                SubmissionResult::SendFailed { reason: err.reason }
            }
        }
    }

    /// Evaluate the guard without side effects.
    ///
    /// Uses the same decision logic as `submit`, so the presentation layer
    /// can pre-emptively disable the submit control and display the
    /// remaining cooldown.
    pub fn peek_status(&self) -> GuardDecision {
        self.guard.evaluate(&self.store.load(), self.clock.now_ms())
    }

    /// Get a handle to the outcome metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// Builder for [`ContactFlow`].
pub struct ContactFlowBuilder<K, V, R> {
    kv: K,
    verifier: V,
    relay: R,
    clock: Arc<dyn Clock>,
    config: GuardConfig,
    state_key: Option<String>,
}

impl<K, V, R> ContactFlowBuilder<K, V, R>
where
    K: KeyValue,
    V: EmailVerifier,
    R: EmailRelay,
{
    /// Use a custom clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a custom guard policy.
    pub fn with_config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    /// Store guard state under a custom key.
    pub fn with_state_key(mut self, key: impl Into<String>) -> Self {
        self.state_key = Some(key.into());
        self
    }

    /// Build the flow.
    ///
    /// # Errors
    /// Returns a `GuardConfigError` if the guard policy is invalid.
    pub fn build(self) -> Result<ContactFlow<K, V, R>, GuardConfigError> {
        let guard = SubmissionGuard::new(self.config)?;
        let store = match self.state_key {
            Some(key) => GuardStateStore::with_key(self.kv, key),
            None => GuardStateStore::new(self.kv),
        };
        Ok(ContactFlow {
            store,
            verifier: self.verifier,
            relay: self.relay,
            clock: self.clock,
            guard,
            metrics: Metrics::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::GuardStateStore;
    use crate::domain::state::GuardState;
    use crate::infrastructure::mocks::{MockClock, MockRelay, MockVerifier};
    use crate::infrastructure::storage::MemoryKv;
    use std::sync::Arc;
    use std::time::Duration;

    const HOUR_MS: i64 = 3_600_000;

    fn message() -> Message {
        Message::new("Ada", "ada@example.com", "Hello", "About a project")
    }

    fn flow_at(
        now_ms: i64,
        kv: Arc<MemoryKv>,
        verifier: MockVerifier,
        relay: MockRelay,
    ) -> (ContactFlow<Arc<MemoryKv>, MockVerifier, MockRelay>, Arc<MockClock>) {
        let clock = Arc::new(MockClock::new(now_ms));
        let flow = ContactFlow::builder(kv, verifier, relay)
            .with_clock(clock.clone())
            .build()
            .unwrap();
        (flow, clock)
    }

    fn stored_state(kv: &Arc<MemoryKv>) -> GuardState {
        GuardStateStore::new(Arc::clone(kv)).load()
    }

    #[test]
    fn test_fresh_state_valid_address_sends() {
        // Scenario A: fresh state, deliverable address, relay succeeds.
        let kv = Arc::new(MemoryKv::new());
        let verifier = MockVerifier::deliverable();
        let relay = MockRelay::succeeding();
        let (mut flow, _clock) = flow_at(1_000, Arc::clone(&kv), verifier.clone(), relay.clone());

        let result = flow.submit("ada@example.com", &message());
        assert_eq!(result, SubmissionResult::Sent);
        assert_eq!(verifier.call_count(), 1);
        assert_eq!(relay.call_count(), 1);
        assert_eq!(relay.last_message(), Some(message()));

        assert_eq!(
            stored_state(&kv),
            GuardState {
                last_success_ms: Some(1_000),
                last_validation_failure_ms: None,
                failed_validations: 0,
            }
        );
        assert_eq!(flow.metrics().sent(), 1);
    }

    #[test]
    fn test_undeliverable_address_costs_a_strike() {
        // Scenario B: two prior strikes, third validation failure at t=5000.
        let kv = Arc::new(MemoryKv::new());
        GuardStateStore::new(Arc::clone(&kv)).save(&GuardState {
            last_success_ms: None,
            last_validation_failure_ms: None,
            failed_validations: 2,
        });

        let verifier = MockVerifier::undeliverable("mailbox does not exist");
        let relay = MockRelay::succeeding();
        let (mut flow, _clock) = flow_at(5_000, Arc::clone(&kv), verifier, relay.clone());

        let result = flow.submit("nobody@example.com", &message());
        assert_eq!(
            result,
            SubmissionResult::RejectedByValidation {
                reason: "mailbox does not exist".to_string(),
            }
        );
        assert_eq!(relay.call_count(), 0);

        assert_eq!(
            stored_state(&kv),
            GuardState {
                last_success_ms: None,
                last_validation_failure_ms: Some(5_000),
                failed_validations: 3,
            }
        );
    }

    #[test]
    fn test_lockout_after_third_strike_skips_collaborators() {
        // Scenario C: state from B, 1000 ms later. Blocked without any
        // collaborator call.
        let kv = Arc::new(MemoryKv::new());
        GuardStateStore::new(Arc::clone(&kv)).save(&GuardState {
            last_success_ms: None,
            last_validation_failure_ms: Some(5_000),
            failed_validations: 3,
        });

        let verifier = MockVerifier::deliverable();
        let relay = MockRelay::succeeding();
        let (mut flow, _clock) = flow_at(6_000, Arc::clone(&kv), verifier.clone(), relay.clone());

        let result = flow.submit("ada@example.com", &message());
        assert_eq!(
            result,
            SubmissionResult::RejectedByGuard {
                reason: CooldownKind::Validation,
                remaining_ms: HOUR_MS - 1_000,
            }
        );
        assert_eq!(verifier.call_count(), 0);
        assert_eq!(relay.call_count(), 0);

        // No state mutation on the blocked path.
        assert_eq!(
            stored_state(&kv),
            GuardState {
                last_success_ms: None,
                last_validation_failure_ms: Some(5_000),
                failed_validations: 3,
            }
        );
        assert_eq!(flow.metrics().blocked(), 1);
    }

    #[test]
    fn test_success_cooldown_blocks_next_attempt() {
        let kv = Arc::new(MemoryKv::new());
        let (mut flow, clock) = flow_at(
            1_000,
            Arc::clone(&kv),
            MockVerifier::deliverable(),
            MockRelay::succeeding(),
        );

        assert!(flow.submit("ada@example.com", &message()).is_sent());

        clock.advance(Duration::from_secs(60));
        assert_eq!(
            flow.submit("ada@example.com", &message()),
            SubmissionResult::RejectedByGuard {
                reason: CooldownKind::Success,
                remaining_ms: HOUR_MS - 60_000,
            }
        );

        // Scenario D boundary: allowed again exactly at expiry.
        clock.set_ms(1_000 + HOUR_MS);
        assert!(flow.submit("ada@example.com", &message()).is_sent());
    }

    #[test]
    fn test_verifier_outage_leaves_state_untouched() {
        // Scenario E: the verifier call itself fails.
        let kv = Arc::new(MemoryKv::new());
        GuardStateStore::new(Arc::clone(&kv)).save(&GuardState {
            last_success_ms: None,
            last_validation_failure_ms: Some(100),
            failed_validations: 2,
        });

        let relay = MockRelay::succeeding();
        let (mut flow, _clock) =
            flow_at(5_000, Arc::clone(&kv), MockVerifier::unavailable(), relay.clone());

        let result = flow.submit("ada@example.com", &message());
        assert_eq!(result, SubmissionResult::ValidationServiceUnavailable);
        assert_eq!(relay.call_count(), 0);

        assert_eq!(
            stored_state(&kv),
            GuardState {
                last_success_ms: None,
                last_validation_failure_ms: Some(100),
                failed_validations: 2,
            }
        );
        assert_eq!(flow.metrics().service_errors(), 1);
    }

    #[test]
    fn test_relay_failure_leaves_state_untouched() {
        let kv = Arc::new(MemoryKv::new());
        let (mut flow, _clock) = flow_at(
            1_000,
            Arc::clone(&kv),
            MockVerifier::deliverable(),
            MockRelay::failing("quota exhausted"),
        );

        let result = flow.submit("ada@example.com", &message());
        assert_eq!(
            result,
            SubmissionResult::SendFailed {
                reason: "quota exhausted".to_string(),
            }
        );

        // Neither a strike nor a success: the user can retry immediately.
        assert_eq!(stored_state(&kv), GuardState::default());
        assert!(flow.peek_status().is_allowed());
    }

    #[test]
    fn test_success_resets_strikes() {
        let kv = Arc::new(MemoryKv::new());
        GuardStateStore::new(Arc::clone(&kv)).save(&GuardState {
            last_success_ms: None,
            last_validation_failure_ms: Some(100),
            failed_validations: 2,
        });

        let (mut flow, _clock) = flow_at(
            9_000,
            Arc::clone(&kv),
            MockVerifier::deliverable(),
            MockRelay::succeeding(),
        );

        assert!(flow.submit("ada@example.com", &message()).is_sent());
        assert_eq!(stored_state(&kv).failed_validations, 0);
    }

    #[test]
    fn test_peek_status_is_idempotent_and_side_effect_free() {
        let kv = Arc::new(MemoryKv::new());
        GuardStateStore::new(Arc::clone(&kv)).save(&GuardState {
            last_success_ms: Some(1_000),
            last_validation_failure_ms: None,
            failed_validations: 0,
        });

        let (flow, _clock) = flow_at(
            2_000,
            Arc::clone(&kv),
            MockVerifier::deliverable(),
            MockRelay::succeeding(),
        );

        let first = flow.peek_status();
        for _ in 0..10 {
            assert_eq!(flow.peek_status(), first);
        }
        assert_eq!(
            first,
            GuardDecision::BlockedBySuccessCooldown {
                remaining_ms: HOUR_MS - 1_000,
            }
        );
        assert_eq!(
            stored_state(&kv),
            GuardState {
                last_success_ms: Some(1_000),
                last_validation_failure_ms: None,
                failed_validations: 0,
            }
        );
    }

    #[test]
    fn test_corrupt_state_does_not_break_submission() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(crate::application::store::DEFAULT_STATE_KEY, "###");

        let (mut flow, _clock) = flow_at(
            1_000,
            Arc::clone(&kv),
            MockVerifier::deliverable(),
            MockRelay::succeeding(),
        );

        assert!(flow.submit("ada@example.com", &message()).is_sent());
        // The successful attempt overwrote the corrupt value with a valid one.
        assert_eq!(stored_state(&kv).last_success_ms, Some(1_000));
    }

    #[test]
    fn test_builder_custom_policy() {
        let kv = Arc::new(MemoryKv::new());
        let clock = Arc::new(MockClock::new(0));
        let mut flow = ContactFlow::builder(
            Arc::clone(&kv),
            MockVerifier::deliverable(),
            MockRelay::succeeding(),
        )
        .with_clock(clock.clone())
        .with_config(GuardConfig {
            success_cooldown: Duration::from_millis(100),
            ..GuardConfig::default()
        })
        .with_state_key("test.guard")
        .build()
        .unwrap();

        assert!(flow.submit("ada@example.com", &message()).is_sent());
        assert!(kv.get("test.guard").is_some());

        clock.advance(Duration::from_millis(50));
        assert!(!flow.submit("ada@example.com", &message()).is_sent());

        clock.advance(Duration::from_millis(50));
        assert!(flow.submit("ada@example.com", &message()).is_sent());
    }

    #[test]
    fn test_builder_rejects_invalid_policy() {
        let result = ContactFlow::builder(
            MemoryKv::new(),
            MockVerifier::deliverable(),
            MockRelay::succeeding(),
        )
        .with_config(GuardConfig {
            max_failed_attempts: 0,
            ..GuardConfig::default()
        })
        .build();

        assert!(matches!(result, Err(GuardConfigError::ZeroMaxFailedAttempts)));
    }
}
