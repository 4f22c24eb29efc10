//! Mock email verifier and relay for testing.

use crate::application::ports::{EmailRelay, EmailVerifier, RelayError, Verdict, VerifierUnavailable};
use crate::domain::message::Message;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted email verifier.
///
/// Responses pushed with [`push_response`](MockVerifier::push_response) are
/// consumed in order; once the script is exhausted, the fallback response
/// chosen at construction repeats indefinitely. Clones share state, so a
/// test can keep a handle for assertions after passing one to a flow.
#[derive(Debug, Clone)]
pub struct MockVerifier {
    inner: Arc<VerifierInner>,
}

#[derive(Debug)]
struct VerifierInner {
    script: Mutex<VecDeque<Result<Verdict, VerifierUnavailable>>>,
    fallback: Result<Verdict, VerifierUnavailable>,
    calls: AtomicUsize,
}

impl MockVerifier {
    fn with_fallback(fallback: Result<Verdict, VerifierUnavailable>) -> Self {
        Self {
            inner: Arc::new(VerifierInner {
                script: Mutex::new(VecDeque::new()),
                fallback,
                calls: AtomicUsize::new(0),
            }),
        }
    }

    /// A verifier that classifies every address as deliverable.
    pub fn deliverable() -> Self {
        Self::with_fallback(Ok(Verdict::Deliverable))
    }

    /// A verifier that classifies every address as undeliverable.
    pub fn undeliverable(reason: impl Into<String>) -> Self {
        Self::with_fallback(Ok(Verdict::Undeliverable {
            reason: reason.into(),
        }))
    }

    /// A verifier whose service is always down.
    pub fn unavailable() -> Self {
        Self::with_fallback(Err(VerifierUnavailable))
    }

    /// Queue a one-shot response ahead of the fallback.
    pub fn push_response(&self, response: Result<Verdict, VerifierUnavailable>) {
        self.inner
            .script
            .lock()
            .expect("MockVerifier mutex poisoned - a test thread panicked while holding the lock")
            .push_back(response);
    }

    /// Number of times `verify` was called.
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl EmailVerifier for MockVerifier {
    fn verify(&self, _candidate_email: &str) -> Result<Verdict, VerifierUnavailable> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .inner
            .script
            .lock()
            .expect("MockVerifier mutex poisoned - a test thread panicked while holding the lock")
            .pop_front();
        scripted.unwrap_or_else(|| self.inner.fallback.clone())
    }
}

/// Scripted email relay.
///
/// Same scripting model as [`MockVerifier`]. Also captures the most recent
/// message payload for assertions.
#[derive(Debug, Clone)]
pub struct MockRelay {
    inner: Arc<RelayInner>,
}

#[derive(Debug)]
struct RelayInner {
    script: Mutex<VecDeque<Result<(), RelayError>>>,
    fallback: Result<(), RelayError>,
    calls: AtomicUsize,
    last_message: Mutex<Option<Message>>,
}

impl MockRelay {
    fn with_fallback(fallback: Result<(), RelayError>) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                script: Mutex::new(VecDeque::new()),
                fallback,
                calls: AtomicUsize::new(0),
                last_message: Mutex::new(None),
            }),
        }
    }

    /// A relay that accepts every message.
    pub fn succeeding() -> Self {
        Self::with_fallback(Ok(()))
    }

    /// A relay that fails every send with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_fallback(Err(RelayError::new(reason)))
    }

    /// Queue a one-shot outcome ahead of the fallback.
    pub fn push_response(&self, response: Result<(), RelayError>) {
        self.inner
            .script
            .lock()
            .expect("MockRelay mutex poisoned - a test thread panicked while holding the lock")
            .push_back(response);
    }

    /// Number of times `send` was called.
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// The most recent message handed to the relay, if any.
    pub fn last_message(&self) -> Option<Message> {
        self.inner
            .last_message
            .lock()
            .expect("MockRelay mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }
}

impl EmailRelay for MockRelay {
    fn send(&self, message: &Message) -> Result<(), RelayError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .inner
            .last_message
            .lock()
            .expect("MockRelay mutex poisoned - a test thread panicked while holding the lock") =
            Some(message.clone());
        let scripted = self
            .inner
            .script
            .lock()
            .expect("MockRelay mutex poisoned - a test thread panicked while holding the lock")
            .pop_front();
        scripted.unwrap_or_else(|| self.inner.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifier_script_then_fallback() {
        let verifier = MockVerifier::deliverable();
        verifier.push_response(Ok(Verdict::Undeliverable {
            reason: "bounced".to_string(),
        }));

        assert!(matches!(
            verifier.verify("a@example.com"),
            Ok(Verdict::Undeliverable { .. })
        ));
        assert_eq!(verifier.verify("a@example.com"), Ok(Verdict::Deliverable));
        assert_eq!(verifier.verify("a@example.com"), Ok(Verdict::Deliverable));
        assert_eq!(verifier.call_count(), 3);
    }

    #[test]
    fn test_relay_captures_message() {
        let relay = MockRelay::succeeding();
        let message = Message::new("Ada", "ada@example.com", "Hi", "Body");

        assert!(relay.send(&message).is_ok());
        assert_eq!(relay.last_message(), Some(message));
        assert_eq!(relay.call_count(), 1);
    }

    #[test]
    fn test_relay_script_then_fallback() {
        let relay = MockRelay::failing("down");
        relay.push_response(Ok(()));

        let message = Message::new("Ada", "ada@example.com", "Hi", "Body");
        assert!(relay.send(&message).is_ok());
        assert_eq!(relay.send(&message), Err(RelayError::new("down")));
    }
}
