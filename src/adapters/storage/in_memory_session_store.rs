//! In-memory session store.
//!
//! Sessions are short-lived dialogue state, so a process-local map is the
//! default store. Nothing survives a restart; users simply start the form
//! again.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::intake::ConversationSession;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory implementation of the SessionStore port.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<UserId, ConversationSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<ConversationSession>, SessionStoreError> {
        Ok(self.sessions.read().await.get(user_id).cloned())
    }

    async fn put(&self, session: &ConversationSession) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(session.user_id().clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.write().await.remove(user_id).is_some())
    }

    async fn purge_idle(
        &self,
        now: &Timestamp,
        max_idle_secs: u64,
    ) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, max_idle_secs));
        Ok(before.saturating_sub(sessions.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::FormKind;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn put_get_delete() {
        let store = InMemorySessionStore::new();
        let session = ConversationSession::start(user("42"), FormKind::Loan);

        store.put(&session).await.unwrap();
        assert_eq!(store.get(&user("42")).await.unwrap(), Some(session));
        assert!(store.delete(&user("42")).await.unwrap());
        assert!(!store.delete(&user("42")).await.unwrap());
        assert!(store.get(&user("42")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_replaces_previous_session() {
        let store = InMemorySessionStore::new();
        store
            .put(&ConversationSession::start(user("7"), FormKind::Loan))
            .await
            .unwrap();
        let fraud = ConversationSession::start(user("7"), FormKind::Fraud);
        store.put(&fraud).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(&user("7")).await.unwrap().unwrap().form(), FormKind::Fraud);
    }

    #[tokio::test]
    async fn purge_drops_only_idle_sessions() {
        let store = InMemorySessionStore::new();
        store
            .put(&ConversationSession::start(user("a"), FormKind::Loan))
            .await
            .unwrap();

        let later = Timestamp::now().plus_secs(1_000);
        assert_eq!(store.purge_idle(&Timestamp::now(), 900).await.unwrap(), 0);
        assert_eq!(store.purge_idle(&later, 900).await.unwrap(), 1);
        assert!(store.is_empty().await);
    }
}
