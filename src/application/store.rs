//! Persistence schema for the guard state.
//!
//! The state is stored as one JSON document under a single key. Any encoding
//! that round-trips the three fields would do; JSON keeps the stored value
//! inspectable from browser devtools.

use crate::application::ports::KeyValue;
use crate::domain::state::GuardState;
use tracing::warn;

/// Key the guard state is stored under unless overridden.
pub const DEFAULT_STATE_KEY: &str = "contact_throttle.guard_state";

/// Schema-aware load/save of [`GuardState`] over a [`KeyValue`] port.
///
/// Loading is fail-safe: an absent value yields the default state, and a
/// value that cannot be parsed is treated as a defect, logged, and replaced
/// by the default state rather than propagated. Corrupt storage must never
/// make the form permanently unusable.
#[derive(Debug, Clone)]
pub struct GuardStateStore<K> {
    kv: K,
    key: String,
}

impl<K: KeyValue> GuardStateStore<K> {
    /// Create a store using the default key.
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_STATE_KEY)
    }

    /// Create a store using a custom key.
    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Load the persisted state. Never fails.
    pub fn load(&self) -> GuardState {
        match self.kv.get(&self.key) {
            None => GuardState::default(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(state) => state,
                Err(err) => {
                    warn!(key = %self.key, error = %err, "corrupt guard state, resetting to default");
                    GuardState::default()
                }
            },
        }
    }

    /// Persist the state.
    pub fn save(&self, state: &GuardState) {
        match serde_json::to_string(state) {
            Ok(encoded) => self.kv.set(&self.key, &encoded),
            // Unreachable for a plain struct of integers; logged rather than
            // propagated so a serialization defect cannot break the form.
            Err(err) => warn!(key = %self.key, error = %err, "failed to encode guard state"),
        }
    }

    /// The key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryKv;
    use std::sync::Arc;

    #[test]
    fn test_absent_state_defaults() {
        let store = GuardStateStore::new(MemoryKv::new());
        assert_eq!(store.load(), GuardState::default());
    }

    #[test]
    fn test_round_trip() {
        let store = GuardStateStore::new(MemoryKv::new());
        let state = GuardState {
            last_success_ms: Some(1_000),
            last_validation_failure_ms: None,
            failed_validations: 2,
        };

        store.save(&state);
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_corrupt_state_resets_to_default() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(DEFAULT_STATE_KEY, "{not json");

        let store = GuardStateStore::new(Arc::clone(&kv));
        assert_eq!(store.load(), GuardState::default());

        // The corrupt value is left in place until the next save; loading
        // alone has no side effects.
        assert_eq!(kv.get(DEFAULT_STATE_KEY).as_deref(), Some("{not json"));
    }

    #[test]
    fn test_wrong_shape_resets_to_default() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(DEFAULT_STATE_KEY, r#"{"last_success_ms": "yesterday"}"#);

        let store = GuardStateStore::new(Arc::clone(&kv));
        assert_eq!(store.load(), GuardState::default());
    }

    #[test]
    fn test_custom_key() {
        let kv = Arc::new(MemoryKv::new());
        let store = GuardStateStore::with_key(Arc::clone(&kv), "portfolio.contact");

        let mut state = GuardState::default();
        state.record_success(5);
        store.save(&state);

        assert!(kv.get("portfolio.contact").is_some());
        assert!(kv.get(DEFAULT_STATE_KEY).is_none());
        assert_eq!(store.key(), "portfolio.contact");
    }
}
