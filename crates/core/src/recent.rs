//! Recently viewed prompt names.
//!
//! The list is kept most-recent-first as a JSON array under a single key of
//! an injected [`KeyValueStore`], so hosts decide where it lives (browser
//! storage, a settings file, memory).

use std::collections::HashMap;

/// Storage key for the serialized name list.
pub const STORAGE_KEY: &str = "prompt_manager_prompt_names";

/// Maximum number of names retained.
pub const MAX_RECENT_NAMES: usize = 50;

/// Minimal string key-value capability.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-process store, for tests and hosts without persistent storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Most-recent-first list of prompt names backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct RecentPromptNames<S> {
    store: S,
}

impl<S: KeyValueStore> RecentPromptNames<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored names; a missing or unreadable value reads as empty.
    pub fn names(&self) -> Vec<String> {
        self.store
            .get(STORAGE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Move `name` (trimmed) to the front. Blank names are ignored.
    pub fn add(&mut self, name: &str) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        let mut names: Vec<String> = self.names().into_iter().filter(|n| n != trimmed).collect();
        names.insert(0, trimmed.to_string());
        names.truncate(MAX_RECENT_NAMES);
        self.write(&names);
    }

    pub fn remove(&mut self, name: &str) {
        let names: Vec<String> = self.names().into_iter().filter(|n| n != name).collect();
        self.write(&names);
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn write(&mut self, names: &[String]) {
        match serde_json::to_string(names) {
            Ok(raw) => self.store.set(STORAGE_KEY, raw),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize recent prompt names"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
