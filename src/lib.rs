//! # contact-throttle
//!
//! A submission guard for contact forms: cooldown-based rate limiting and
//! email-validation strikes over locally persisted state.
//!
//! The crate protects a third-party email-relay quota from casual abuse
//! (spam, repeated invalid addresses) without any backend. It is a library
//! consumed by presentation code; layout, animation, and copy live with the
//! host. The guard is a deterrent within one browser profile, not a
//! security boundary.
//!
//! ## How attempts resolve
//!
//! Each submission attempt runs through [`ContactFlow::submit`]:
//!
//! 1. **Guard check.** The [`SubmissionGuard`] inspects persisted counters.
//!    A successful send within the last hour, or three consecutive failed
//!    validations within the last hour, blocks the attempt before any
//!    external call is made. The decision carries the exact remaining
//!    cooldown in milliseconds so the host can render a countdown.
//! 2. **Verification.** The email-verification collaborator classifies the
//!    candidate address. An undeliverable address costs the user a strike;
//!    an unreachable verification service costs nothing.
//! 3. **Send.** The relay collaborator takes the message. Success resets
//!    the strike counter and starts the success cooldown; a relay failure
//!    changes nothing, so the user can retry immediately.
//!
//! Persisted state mutates on exactly two paths: a failed validation and a
//! successful send. Cooldowns exist to protect the verification and send
//! quotas from deliberate abuse, not to penalize transient outages.
//!
//! All cooldown spacing and the strike threshold are configurable via
//! [`GuardConfig`]; the defaults are one hour, one hour, and three strikes.
//!
//! ## Quick Start
//!
//! Production hosts implement the [`KeyValue`], [`EmailVerifier`], and
//! [`EmailRelay`] ports against their origin store and providers. The
//! bundled in-memory backend and mocks make the example below run as-is:
//!
//! ```
//! use contact_throttle::mocks::{MockClock, MockRelay, MockVerifier};
//! use contact_throttle::{ContactFlow, GuardDecision, MemoryKv, Message, SubmissionResult};
//! use std::sync::Arc;
//!
//! let clock = Arc::new(MockClock::new(1_000));
//! let mut flow = ContactFlow::builder(
//!     MemoryKv::new(),
//!     MockVerifier::deliverable(),
//!     MockRelay::succeeding(),
//! )
//! .with_clock(clock.clone())
//! .build()
//! .unwrap();
//!
//! let message = Message::new("Ada", "ada@example.com", "Hello", "About a project");
//! assert_eq!(flow.submit("ada@example.com", &message), SubmissionResult::Sent);
//!
//! // The success cooldown now blocks further sends for an hour.
//! match flow.peek_status() {
//!     GuardDecision::BlockedBySuccessCooldown { remaining_ms } => {
//!         assert_eq!(remaining_ms, 3_600_000);
//!     }
//!     other => panic!("unexpected status: {other:?}"),
//! }
//! ```
//!
//! ## Peeking without submitting
//!
//! [`ContactFlow::peek_status`] evaluates the same guard logic with no side
//! effects, so the host can disable the submit control pre-emptively and
//! keep a countdown accurate by polling.
//!
//! ## Failure behavior
//!
//! Every outcome of [`ContactFlow::submit`] is an expected branch of normal
//! operation and is returned as a [`SubmissionResult`] value; nothing is
//! thrown. Persisted state that fails to parse is treated as a defect,
//! logged through `tracing`, and replaced with the default state so corrupt
//! storage can never make the form permanently unusable.
//!
//! ## Testing
//!
//! [`mocks`](crate::infrastructure::mocks) provides a controllable clock
//! and scripted collaborators; combined with [`MemoryKv`], the whole flow
//! runs deterministically without a browser or network.

// Domain layer - pure decision logic
pub mod domain;

// Application layer - orchestration and ports
pub mod application;

// Infrastructure layer - adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    guard::{CooldownKind, GuardConfig, GuardConfigError, GuardDecision, SubmissionGuard},
    message::Message,
    state::GuardState,
};

pub use application::{
    flow::{ContactFlow, ContactFlowBuilder, SubmissionResult},
    metrics::{Metrics, MetricsSnapshot},
    ports::{Clock, EmailRelay, EmailVerifier, KeyValue, RelayError, Verdict, VerifierUnavailable},
    store::{GuardStateStore, DEFAULT_STATE_KEY},
};

pub use infrastructure::{clock::SystemClock, mocks, storage::MemoryKv};
