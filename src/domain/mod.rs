//! Domain layer - pure decision logic with no I/O.
//!
//! This layer contains the core concepts and invariants of the submission
//! guard:
//! - Cooldown evaluation (the guard itself)
//! - Persisted guard state and its mutation rules
//! - The relay message payload
//!
//! All types in this layer are pure and easily testable.

pub mod guard;
pub mod message;
pub mod state;
