//! Infrastructure layer - adapters for the application ports.
//!
//! This layer provides adapters for:
//! - Clock abstraction (system time vs mock)
//! - Key-value storage (in-memory map)
//! - Test doubles for the external collaborators

pub mod clock;
pub mod storage;

/// Controllable test doubles for the clock and the external collaborators.
///
/// Kept as a regular module so integration tests and downstream consumers
/// can use them without feature plumbing; production code simply has no
/// reason to construct them.
pub mod mocks;
