//! Durable key/value storage collaborator.
//!
//! The core only needs get/set/remove semantics; each host front-end supplies
//! its own backing (browser localStorage, mini-program storage API). The
//! in-memory implementation backs headless hosts and tests.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Storage key for the persisted session token.
pub const TOKEN_KEY: &str = "TOKEN";
/// Storage key for the persisted base-URL override.
pub const BASE_URL_KEY: &str = "BASE_URL";

pub trait KvStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local storage with no persistence across runs.
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.inner.write().remove(key);
    }
}
