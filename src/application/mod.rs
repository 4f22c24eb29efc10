//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the guard and the external collaborators:
//! - The contact flow (one end-to-end submission attempt)
//! - The guard state store (persistence schema over the key-value port)
//! - Outcome metrics
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod flow;
pub mod metrics;
pub mod ports;
pub mod store;
