//! Cooldown evaluation for submission attempts.
//!
//! The guard is a pure function from `(GuardState, now)` to a decision. It
//! performs no I/O and holds no mutable state, so it can be evaluated
//! speculatively (e.g. to pre-disable a submit button) as often as needed.

use crate::domain::state::GuardState;
use std::time::Duration;

/// Decision made by the guard for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The attempt may proceed to verification and send.
    Allowed,
    /// Blocked: a successful send happened too recently.
    BlockedBySuccessCooldown {
        /// Milliseconds until the cooldown expires. Always > 0.
        remaining_ms: i64,
    },
    /// Blocked: too many consecutive validation failures too recently.
    BlockedByValidationCooldown {
        /// Milliseconds until the cooldown expires. Always > 0.
        remaining_ms: i64,
    },
}

impl GuardDecision {
    /// Check if this decision allows the attempt.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allowed)
    }

    /// Check if this decision blocks the attempt.
    pub fn is_blocked(&self) -> bool {
        !self.is_allowed()
    }

    /// Remaining cooldown in milliseconds, if blocked.
    pub fn remaining_ms(&self) -> Option<i64> {
        match self {
            GuardDecision::Allowed => None,
            GuardDecision::BlockedBySuccessCooldown { remaining_ms }
            | GuardDecision::BlockedByValidationCooldown { remaining_ms } => Some(*remaining_ms),
        }
    }

    /// Which cooldown blocked the attempt, if any.
    pub fn cooldown_kind(&self) -> Option<CooldownKind> {
        match self {
            GuardDecision::Allowed => None,
            GuardDecision::BlockedBySuccessCooldown { .. } => Some(CooldownKind::Success),
            GuardDecision::BlockedByValidationCooldown { .. } => Some(CooldownKind::Validation),
        }
    }
}

/// The two cooldowns the guard enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownKind {
    /// Minimum spacing between successful sends.
    Success,
    /// Lockout after repeated validation failures.
    Validation,
}

/// Error returned when guard configuration validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardConfigError {
    /// Success cooldown duration must be greater than zero
    ZeroSuccessCooldown,
    /// Validation cooldown duration must be greater than zero
    ZeroValidationCooldown,
    /// Maximum failed attempts must be greater than zero
    ZeroMaxFailedAttempts,
}

impl std::fmt::Display for GuardConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardConfigError::ZeroSuccessCooldown => {
                write!(f, "success cooldown must be greater than 0")
            }
            GuardConfigError::ZeroValidationCooldown => {
                write!(f, "validation cooldown must be greater than 0")
            }
            GuardConfigError::ZeroMaxFailedAttempts => {
                write!(f, "max failed attempts must be greater than 0")
            }
        }
    }
}

impl std::error::Error for GuardConfigError {}

/// Cooldown policy constants.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Minimum spacing between successful sends (default: 1 hour).
    pub success_cooldown: Duration,
    /// Lockout duration after repeated validation failures (default: 1 hour).
    pub validation_cooldown: Duration,
    /// Consecutive validation failures before the lockout activates
    /// (default: 3).
    pub max_failed_attempts: u32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            success_cooldown: Duration::from_secs(3600),
            validation_cooldown: Duration::from_secs(3600),
            max_failed_attempts: 3,
        }
    }
}

impl GuardConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns a `GuardConfigError` if either cooldown is zero or the strike
    /// threshold is zero.
    pub fn validate(&self) -> Result<(), GuardConfigError> {
        if self.success_cooldown.is_zero() {
            return Err(GuardConfigError::ZeroSuccessCooldown);
        }
        if self.validation_cooldown.is_zero() {
            return Err(GuardConfigError::ZeroValidationCooldown);
        }
        if self.max_failed_attempts == 0 {
            return Err(GuardConfigError::ZeroMaxFailedAttempts);
        }
        Ok(())
    }
}

/// Pure decision logic for submission attempts.
///
/// Evaluation order: the success cooldown takes priority over the validation
/// cooldown. Absent timestamps never trigger a block. The cooldown boundary
/// is exclusive: an attempt exactly `cooldown` after the stored timestamp is
/// allowed.
///
/// Backward clock jumps are not corrected: if `now` is earlier than a stored
/// timestamp, the elapsed time is negative and the comparison still reads as
/// "within cooldown". This matches the observable behavior of the system the
/// guard was extracted from.
///
/// # Example
/// ```
/// use contact_throttle::{GuardDecision, GuardState, SubmissionGuard};
///
/// let guard = SubmissionGuard::default();
/// let state = GuardState::new();
///
/// // Nothing has happened yet, so any attempt is allowed.
/// assert_eq!(guard.evaluate(&state, 1_000), GuardDecision::Allowed);
/// ```
#[derive(Debug, Clone)]
pub struct SubmissionGuard {
    success_cooldown_ms: i64,
    validation_cooldown_ms: i64,
    max_failed_attempts: u32,
}

fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

impl SubmissionGuard {
    /// Create a guard from a validated configuration.
    ///
    /// # Errors
    /// Returns a `GuardConfigError` if the configuration is invalid.
    pub fn new(config: GuardConfig) -> Result<Self, GuardConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: GuardConfig) -> Self {
        Self {
            success_cooldown_ms: millis(config.success_cooldown),
            validation_cooldown_ms: millis(config.validation_cooldown),
            max_failed_attempts: config.max_failed_attempts,
        }
    }

    /// Decide whether an attempt at `now_ms` may proceed.
    pub fn evaluate(&self, state: &GuardState, now_ms: i64) -> GuardDecision {
        if let Some(sent_at) = state.last_success_ms {
            let elapsed = now_ms - sent_at;
            if elapsed < self.success_cooldown_ms {
                return GuardDecision::BlockedBySuccessCooldown {
                    remaining_ms: self.success_cooldown_ms - elapsed,
                };
            }
        }

        if state.failed_validations >= self.max_failed_attempts {
            if let Some(failed_at) = state.last_validation_failure_ms {
                let elapsed = now_ms - failed_at;
                if elapsed < self.validation_cooldown_ms {
                    return GuardDecision::BlockedByValidationCooldown {
                        remaining_ms: self.validation_cooldown_ms - elapsed,
                    };
                }
            }
        }

        GuardDecision::Allowed
    }
}

impl Default for SubmissionGuard {
    fn default() -> Self {
        Self::from_config(GuardConfig::default())
    }
}
