//! In-memory preference store for development and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::domain::foundation::{Locale, UserId};
use crate::ports::{PreferenceError, PreferenceStore, PreferenceUpdate, UserPreference};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    preferences: Arc<DashMap<UserId, UserPreference>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserPreference>, PreferenceError> {
        Ok(self.preferences.get(user_id).map(|p| p.value().clone()))
    }

    async fn set(
        &self,
        user_id: &UserId,
        update: PreferenceUpdate,
        default_locale: Locale,
    ) -> Result<UserPreference, PreferenceError> {
        let mut entry = self
            .preferences
            .entry(user_id.clone())
            .or_insert_with(|| UserPreference::with_locale(default_locale));
        entry.apply(&update);
        Ok(entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_creates_then_updates() {
        let store = InMemoryPreferenceStore::new();
        let user = UserId::new("99").unwrap();
        assert!(store.get(&user).await.unwrap().is_none());

        store
            .set(
                &user,
                PreferenceUpdate {
                    locale: Some(Locale::Pa),
                    ..Default::default()
                },
                Locale::Hi,
            )
            .await
            .unwrap();
        let stored = store
            .set(
                &user,
                PreferenceUpdate {
                    location: Some("Ludhiana".into()),
                    advisory_enabled: Some(true),
                    ..Default::default()
                },
                Locale::Hi,
            )
            .await
            .unwrap();

        assert_eq!(stored.locale, Locale::Pa);
        assert_eq!(stored.location.as_deref(), Some("Ludhiana"));
        assert!(stored.advisory_enabled);
        assert_eq!(store.get(&user).await.unwrap(), Some(stored));
    }
}
