//! Preference Store Port - Interface for per-user settings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Locale, UserId};

/// A user's stored settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    pub locale: Locale,
    pub location: Option<String>,
    /// Opted in to the daily advisory broadcast.
    pub advisory_enabled: bool,
}

impl UserPreference {
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            location: None,
            advisory_enabled: false,
        }
    }

    /// Applies the set fields of `update`.
    pub fn apply(&mut self, update: &PreferenceUpdate) {
        if let Some(locale) = update.locale {
            self.locale = locale;
        }
        if let Some(location) = &update.location {
            self.location = Some(location.clone());
        }
        if let Some(enabled) = update.advisory_enabled {
            self.advisory_enabled = enabled;
        }
    }
}

/// Partial update; `None` leaves a setting untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    pub locale: Option<Locale>,
    pub location: Option<String>,
    pub advisory_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreferenceError {
    #[error("Preference store unavailable: {0}")]
    Unavailable(String),
}

/// Port for reading and updating user preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// `None` when the user never set anything.
    async fn get(&self, user_id: &UserId) -> Result<Option<UserPreference>, PreferenceError>;

    /// Applies `update`, creating the record with `default_locale` if absent.
    ///
    /// # Returns
    /// The preference as stored after the update
    async fn set(
        &self,
        user_id: &UserId,
        update: PreferenceUpdate,
        default_locale: Locale,
    ) -> Result<UserPreference, PreferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_set_fields() {
        let mut pref = UserPreference::with_locale(Locale::Hi);
        pref.apply(&PreferenceUpdate {
            location: Some("Jaipur".into()),
            ..Default::default()
        });
        assert_eq!(pref.locale, Locale::Hi);
        assert_eq!(pref.location.as_deref(), Some("Jaipur"));
        assert!(!pref.advisory_enabled);
    }
}
