//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the
//! application layer needs. Infrastructure adapters implement these ports.

use crate::domain::message::Message;
use std::fmt::Debug;

/// Port for obtaining current wall-clock time.
///
/// This abstraction allows the application layer to work with time without
/// depending on the system clock. Infrastructure provides concrete
/// implementations (`SystemClock`, `MockClock`).
pub trait Clock: Send + Sync + Debug {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Port for per-origin key-value persistence.
///
/// The host environment decides what backs it: a browser origin store in
/// production, an in-memory map in tests. The store must survive reloads
/// and is cleared only by explicit user or browser action; the application
/// layer never deletes keys.
pub trait KeyValue: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
}

/// Verdict from the email-verification collaborator.
///
/// Adapters are responsible for mapping a malformed or field-missing
/// response to `Undeliverable`; a response that cannot name the address
/// deliverable counts as a failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The address can plausibly receive mail.
    Deliverable,
    /// The address cannot receive mail (or the response was malformed).
    Undeliverable {
        /// Why the address was rejected, for user-facing copy.
        reason: String,
    },
}

/// Error raised when the verification service itself cannot be reached.
///
/// Distinct from `Verdict::Undeliverable`: an unreachable service says
/// nothing about the address and must not count as a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierUnavailable;

impl std::fmt::Display for VerifierUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "email verification service unavailable")
    }
}

impl std::error::Error for VerifierUnavailable {}

/// Port for the email-verification collaborator.
///
/// Treated as an untrusted, unreliable network call. Adapters own the
/// timeout policy; the flow only sees the typed outcome.
pub trait EmailVerifier {
    /// Classify a candidate address.
    ///
    /// # Errors
    /// Returns `VerifierUnavailable` on network or service failure.
    fn verify(&self, candidate_email: &str) -> Result<Verdict, VerifierUnavailable>;
}

/// Error raised when the email relay fails to accept a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayError {
    /// Relay-reported failure description.
    pub reason: String,
}

impl RelayError {
    /// Build a relay error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "email relay failed: {}", self.reason)
    }
}

impl std::error::Error for RelayError {}

/// Port for the email-relay collaborator.
///
/// The relay has its own quota, which the guard exists to protect.
pub trait EmailRelay {
    /// Hand the message to the relay.
    ///
    /// # Errors
    /// Returns a `RelayError` if the relay rejects or fails to accept the
    /// message.
    fn send(&self, message: &Message) -> Result<(), RelayError>;
}
