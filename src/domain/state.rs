//! Persisted guard state.
//!
//! The only durable entity in the crate. One record per browser profile,
//! mutated exclusively by the contact flow after an attempt resolves.

use serde::{Deserialize, Serialize};

/// Durable counters backing the submission guard.
///
/// All timestamps are epoch milliseconds. Signed integers are used so that
/// a backdated system clock produces a negative elapsed time instead of an
/// underflow; the guard's comparisons handle that case explicitly.
///
/// Invariants, upheld by the mutators below:
/// - `failed_validations` resets to 0 on every successful send.
/// - `last_success_ms` only ever increases.
/// - `failed_validations` increments by exactly 1 per failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardState {
    /// Epoch ms of the last successful send, if any.
    pub last_success_ms: Option<i64>,
    /// Epoch ms of the most recent failed email validation, if any.
    pub last_validation_failure_ms: Option<i64>,
    /// Consecutive failed-validation count since the last reset.
    pub failed_validations: u32,
}

impl GuardState {
    /// Fresh state: nothing has ever happened.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful send at `now_ms`.
    ///
    /// Resets the strike counter and advances the success timestamp. The
    /// timestamp never moves backward, even if the clock does.
    pub fn record_success(&mut self, now_ms: i64) {
        self.last_success_ms = Some(match self.last_success_ms {
            Some(prev) => prev.max(now_ms),
            None => now_ms,
        });
        self.failed_validations = 0;
    }

    /// Record one failed email validation at `now_ms`.
    pub fn record_validation_failure(&mut self, now_ms: i64) {
        self.failed_validations = self.failed_validations.saturating_add(1);
        self.last_validation_failure_ms = Some(now_ms);
    }
}
