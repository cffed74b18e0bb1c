//! Key/value persistence
//!
//! Features:
//! - `KeyValueStore` trait over string keys and values
//! - LocalStorage backend on the web
//! - In-memory backend for native runs and tests
//!
//! Storage is best-effort: a failed read looks like a missing key and a failed
//! write is logged and dropped.

use std::collections::HashMap;

/// Minimal string key/value storage
pub trait KeyValueStore {
    /// Stored value, `None` if absent or unreadable
    fn get(&self, key: &str) -> Option<String>;
    /// Store a value; returns whether the write went through
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// Volatile store (native builds, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        match Self::storage() {
            Some(storage) => {
                let ok = storage.set_item(key, value).is_ok();
                if !ok {
                    log::warn!("LocalStorage write failed for {}", key);
                }
                ok
            }
            None => {
                log::warn!("LocalStorage unavailable, {} not saved", key);
                false
            }
        }
    }
}
