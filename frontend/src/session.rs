//! Durable session state.
//!
//! The session is three independent keys in browser LocalStorage
//! (`token` / `username` / `role`). Writes are not atomic; a partial write
//! left behind by an interrupted operation degrades gracefully because
//! only the presence of `token` gates access.

use std::sync::Arc;

use gloo_storage::Storage;
use leptos::prelude::*;
use sweetshop_shared::Role;

const KEY_TOKEN: &str = "token";
const KEY_USERNAME: &str = "username";
const KEY_ROLE: &str = "role";

/// The client-held proof of identity plus cached identity attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// Key/value storage the session store writes through. Abstracted so the
/// store can be exercised in native tests without a browser.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// LocalStorage-backed implementation used in the running app.
pub struct BrowserStorage;

impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        gloo_storage::LocalStorage::get(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        // Quota exhaustion is the only failure mode; nothing sensible to do.
        let _ = gloo_storage::LocalStorage::set(key, value);
    }

    fn remove(&self, key: &str) {
        gloo_storage::LocalStorage::delete(key);
    }
}

/// Read/write access to the persisted session. Cheap to clone; every clone
/// shares the same backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn browser() -> Self {
        Self::new(Arc::new(BrowserStorage))
    }

    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// The bearer token, if any. Token presence alone gates protected views.
    pub fn token(&self) -> Option<String> {
        self.backend.get(KEY_TOKEN)
    }

    /// The full session, or `None` when no token is stored. A missing
    /// username or role from a partial write falls back to defaults rather
    /// than invalidating the token.
    pub fn load(&self) -> Option<Session> {
        let token = self.token()?;
        let username = self.backend.get(KEY_USERNAME).unwrap_or_default();
        let role = self
            .backend
            .get(KEY_ROLE)
            .and_then(|r| Role::parse(&r))
            .unwrap_or_default();
        Some(Session {
            token,
            username,
            role,
        })
    }

    /// Writes all three keys. No validation of the token shape.
    pub fn set(&self, session: &Session) {
        self.backend.set(KEY_TOKEN, &session.token);
        self.backend.set(KEY_USERNAME, &session.username);
        self.backend.set(KEY_ROLE, session.role.as_str());
    }

    /// Removes all three keys. Idempotent.
    pub fn clear(&self) {
        self.backend.remove(KEY_TOKEN);
        self.backend.remove(KEY_USERNAME);
        self.backend.remove(KEY_ROLE);
    }
}

/// The store shared through the Leptos context at the app root.
pub fn use_session_store() -> SessionStore {
    use_context::<SessionStore>().expect("SessionStore should be provided")
}

/// In-memory backend for native tests, shared with the API client tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::StorageBackend;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct MemoryStorage {
        entries: Mutex<HashMap<String, String>>,
    }

    impl StorageBackend for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.entries.lock().unwrap().remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryStorage;
    use super::*;

    fn memory_store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::default()))
    }

    fn session() -> Session {
        Session {
            token: "abc123".into(),
            username: "alice".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn set_then_load_round_trips_exactly() {
        let store = memory_store();
        store.set(&session());
        assert_eq!(store.load(), Some(session()));
        assert_eq!(store.token().as_deref(), Some("abc123"));
    }

    #[test]
    fn load_is_none_without_a_token() {
        let store = memory_store();
        assert_eq!(store.load(), None);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn clear_removes_everything_and_is_idempotent() {
        let store = memory_store();
        store.set(&session());
        store.clear();
        assert_eq!(store.load(), None);
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn partial_write_without_token_counts_as_anonymous() {
        let backend = Arc::new(MemoryStorage::default());
        backend.set(KEY_USERNAME, "alice");
        backend.set(KEY_ROLE, "ADMIN");
        let store = SessionStore::new(backend);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn partial_write_with_token_degrades_to_defaults() {
        let backend = Arc::new(MemoryStorage::default());
        backend.set(KEY_TOKEN, "abc123");
        let store = SessionStore::new(backend);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.token, "abc123");
        assert_eq!(loaded.username, "");
        assert_eq!(loaded.role, Role::User);
    }

    #[test]
    fn unknown_role_string_degrades_to_user() {
        let backend = Arc::new(MemoryStorage::default());
        backend.set(KEY_TOKEN, "abc123");
        backend.set(KEY_ROLE, "SUPERUSER");
        let store = SessionStore::new(backend);
        assert_eq!(store.load().unwrap().role, Role::User);
    }
}
