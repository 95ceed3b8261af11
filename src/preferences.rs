// src/preferences.rs
//! Preference collaborator contract and an in-memory implementation

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Durable string map the secure store writes through to.
///
/// Implementations own persistence and concurrency; the store hands them
/// already-encrypted values and treats everything stored as opaque text.
/// There is no error channel — a collaborator that can fail must deal with
/// that internally.
pub trait Preferences {
    /// Store `value` under `key`, replacing any existing entry.
    fn set(&self, key: &str, value: &str);

    /// The stored value for `key`, or `default` when the key is absent.
    fn get(&self, key: &str, default: Option<&str>) -> Option<String>;

    /// Remove `key` and its value. Removing an absent key is a no-op.
    fn remove(&self, key: &str);

    /// Remove every entry.
    fn clear(&self);
}

/// In-memory [`Preferences`] for tests and ephemeral sessions.
///
/// Clones share the same underlying map, which makes it easy to hand one
/// handle to a store and keep another for inspection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferences {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    // String inserts cannot leave the map half-written, so a poisoned lock
    // is still a usable map.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Preferences for InMemoryPreferences {
    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_owned(), value.to_owned());
    }

    fn get(&self, key: &str, default: Option<&str>) -> Option<String> {
        self.entries()
            .get(key)
            .cloned()
            .or_else(|| default.map(str::to_owned))
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }

    fn clear(&self) {
        self.entries().clear();
    }
}
