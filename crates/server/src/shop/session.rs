//! In-memory session store.
//!
//! Sessions are created lazily on first reference and kept for the process
//! lifetime; nothing evicts them. Each session sits behind its own lock so
//! per-user mutation serializes without a store-wide write hold.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use pantry_core::{UserId, UserSession};

/// Shared handle to all user sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<UserId, Arc<Mutex<UserSession>>>>>,
}

impl SessionStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a user's session, creating an empty one on first reference.
    /// Never fails.
    pub async fn get_or_create(&self, user: &UserId) -> Arc<Mutex<UserSession>> {
        if let Some(session) = self.sessions.read().await.get(user) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        // Re-check: another task may have created it between the two locks
        Arc::clone(sessions.entry(user.clone()).or_default())
    }

    /// Copy of a user's current session state.
    pub async fn snapshot(&self, user: &UserId) -> UserSession {
        let handle = self.get_or_create(user).await;
        let session = handle.lock().await;
        session.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::ProductId;

    #[tokio::test]
    async fn test_get_or_create_is_stable() {
        let store = SessionStore::new();
        let user = UserId::from("mari");

        {
            let handle = store.get_or_create(&user).await;
            handle.lock().await.toggle_favorite(ProductId::new(3));
        }

        // Same user resolves to the same session
        let snapshot = store.snapshot(&user).await;
        assert!(snapshot.is_favorite(ProductId::new(3)));

        // Different users get independent sessions
        let other = store.snapshot(&UserId::from("jaan")).await;
        assert!(other.favorites.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        let store = SessionStore::new();
        let user = UserId::from("mari");

        let mut snapshot = store.snapshot(&user).await;
        snapshot.toggle_favorite(ProductId::new(1));

        // Mutating the copy leaves the stored session untouched
        assert!(store.snapshot(&user).await.favorites.is_empty());
    }
}
