//! Session Store
//!
//! Token and signed-in identity, persisted under two keys:
//! - `access_token`: opaque bearer token
//! - `auth_user_data`: JSON `{"id": .., "role": ..}`
//!
//! Nothing is cached in memory; every read goes to the backing store.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const TOKEN_KEY: &str = "access_token";
pub const IDENTITY_KEY: &str = "auth_user_data";

/// String key/value storage (browser localStorage in the UI)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store; the unit tests run the client against it
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl<K: KeyValueStore> KeyValueStore for &K {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Cached identity of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default = "guest_role")]
    pub role: String,
}

fn guest_role() -> String {
    "guest".to_string()
}

impl AuthIdentity {
    pub fn guest() -> Self {
        Self {
            id: None,
            role: guest_role(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Everything persisted for a signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: u32,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct SessionStore<K> {
    storage: K,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(storage: K) -> Self {
        Self { storage }
    }

    /// Current bearer token, trimmed; blank tokens read as absent
    pub fn token(&self) -> Option<String> {
        self.storage
            .get(TOKEN_KEY)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store the token alone (login stores it before fetching the profile)
    pub fn set_token(&self, token: &str) {
        self.storage.set(TOKEN_KEY, token);
    }

    pub fn set_session(&self, token: &str, user_id: u32, role: &str) {
        self.set_token(token);
        let identity = AuthIdentity {
            id: Some(user_id),
            role: role.to_string(),
        };
        match serde_json::to_string(&identity) {
            Ok(json) => self.storage.set(IDENTITY_KEY, &json),
            Err(e) => log::error!("[SESSION] failed to encode identity: {}", e),
        }
    }

    /// Cached identity; missing or unreadable data reads as a guest
    pub fn identity(&self) -> AuthIdentity {
        let Some(raw) = self.storage.get(IDENTITY_KEY) else {
            return AuthIdentity::guest();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("[SESSION] unreadable {}: {}", IDENTITY_KEY, e);
            AuthIdentity::guest()
        })
    }

    pub fn session(&self) -> Option<Session> {
        let token = self.token()?;
        let identity = self.identity();
        Some(Session {
            token,
            user_id: identity.id?,
            role: identity.role,
        })
    }

    pub fn clear_session(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(IDENTITY_KEY);
    }
}
