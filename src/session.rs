//! Client-held session state: the authentication token plus a transient
//! profile cache. The token is the sole authentication signal and is mirrored
//! into durable storage on every set/clear; the cached profile is populated
//! lazily after login (or on first gated access) and is never persisted.

use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use crate::storage::{KvStorage, TOKEN_KEY};

/// Profile fields the core itself consults. The backend nests the role as a
/// record while both front-ends compare a plain string, so either shape is
/// accepted on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "role_code")]
    pub role: String,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

fn role_code<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Role {
        Plain(String),
        Record {
            #[serde(default)]
            code: String,
        },
        Other(serde_json::Value),
    }
    Ok(match Role::deserialize(de)? {
        Role::Plain(s) => s,
        Role::Record { code } => code,
        Role::Other(_) => String::new(),
    })
}

pub struct SessionStore {
    storage: Arc<dyn KvStorage>,
    token: RwLock<String>,
    user_info: RwLock<Option<UserInfo>>,
}

impl SessionStore {
    /// Re-loads any token persisted by a previous run.
    pub fn new(storage: Arc<dyn KvStorage>) -> Self {
        let token = storage.get(TOKEN_KEY).unwrap_or_default();
        Self {
            storage,
            token: RwLock::new(token),
            user_info: RwLock::new(None),
        }
    }

    pub fn token(&self) -> String {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.read().is_empty()
    }

    pub fn set_token(&self, token: &str) {
        *self.token.write() = token.to_string();
        self.storage.set(TOKEN_KEY, token);
    }

    /// Idempotent: clearing an already-empty session changes nothing.
    pub fn clear(&self) {
        self.token.write().clear();
        *self.user_info.write() = None;
        self.storage.remove(TOKEN_KEY);
    }

    pub fn user_info(&self) -> Option<UserInfo> {
        self.user_info.read().clone()
    }

    pub fn cache_user_info(&self, info: UserInfo) {
        *self.user_info.write() = Some(info);
    }
}
