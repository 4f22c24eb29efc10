//! Outcome metrics for submission attempts.
//!
//! Lightweight counters the presentation layer can poll, e.g. to surface
//! "N messages sent" or to notice an unusual block rate during development.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking submission outcomes.
///
/// All counters use atomic operations; the handle is cheap to clone and
/// shares the underlying counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Attempts that ended in a successful send
    sent: AtomicU64,
    /// Attempts rejected by the guard before any external call
    blocked: AtomicU64,
    /// Attempts rejected because the address failed validation
    validation_failures: AtomicU64,
    /// Attempts ended by a verifier or relay outage
    service_errors: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_sent(&self) {
        self.inner.sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_blocked(&self) {
        self.inner.blocked.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_validation_failure(&self) {
        self.inner.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_service_error(&self) {
        self.inner.service_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Attempts that ended in a successful send.
    pub fn sent(&self) -> u64 {
        self.inner.sent.load(Ordering::Relaxed)
    }

    /// Attempts rejected by the guard.
    pub fn blocked(&self) -> u64 {
        self.inner.blocked.load(Ordering::Relaxed)
    }

    /// Attempts rejected because the address failed validation.
    pub fn validation_failures(&self) -> u64 {
        self.inner.validation_failures.load(Ordering::Relaxed)
    }

    /// Attempts ended by a verifier or relay outage.
    pub fn service_errors(&self) -> u64 {
        self.inner.service_errors.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sent: self.sent(),
            blocked: self.blocked(),
            validation_failures: self.validation_failures(),
            service_errors: self.service_errors(),
        }
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Attempts that ended in a successful send
    pub sent: u64,
    /// Attempts rejected by the guard
    pub blocked: u64,
    /// Attempts rejected because the address failed validation
    pub validation_failures: u64,
    /// Attempts ended by a verifier or relay outage
    pub service_errors: u64,
}

impl MetricsSnapshot {
    /// Total attempts that resolved, across all outcomes.
    pub fn total_attempts(&self) -> u64 {
        self.sent
            .saturating_add(self.blocked)
            .saturating_add(self.validation_failures)
            .saturating_add(self.service_errors)
    }
}
