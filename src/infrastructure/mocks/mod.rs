//! Mock implementations for testing.
//!
//! This module provides test doubles for the clock and the external
//! collaborators, enabling deterministic testing of the contact flow
//! without a browser or network.

pub mod clock;
pub mod collaborators;

pub use clock::MockClock;
pub use collaborators::{MockRelay, MockVerifier};
