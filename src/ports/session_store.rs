//! Session Store Port - Interface for keeping in-progress form sessions.
//!
//! At most one session exists per user. A missing session means the user
//! is idle.

use async_trait::async_trait;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::intake::ConversationSession;

/// Errors that can occur during session store operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),
}

/// Port for reading and writing per-user sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session of `user_id`
    ///
    /// # Returns
    /// `None` when the user has no form in progress
    async fn get(&self, user_id: &UserId) -> Result<Option<ConversationSession>, SessionStoreError>;

    /// Insert or replace the session keyed by its user
    async fn put(&self, session: &ConversationSession) -> Result<(), SessionStoreError>;

    /// Remove the session of `user_id`
    ///
    /// # Returns
    /// `true` if a session was removed
    async fn delete(&self, user_id: &UserId) -> Result<bool, SessionStoreError>;

    /// Remove sessions silent for longer than `max_idle_secs`
    ///
    /// # Returns
    /// The number of sessions removed
    async fn purge_idle(&self, now: &Timestamp, max_idle_secs: u64)
        -> Result<usize, SessionStoreError>;
}
