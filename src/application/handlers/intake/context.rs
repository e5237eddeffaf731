//! Collaborators shared by the intake command handlers.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::UserLocks;
use crate::domain::foundation::{Locale, Timestamp, UserId};
use crate::ports::SessionStoreError;
use crate::ports::{PreferenceStore, SessionStore};

/// Tunables for the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeSettings {
    /// Sessions silent for longer than this are expired on the next message.
    pub idle_timeout_secs: u64,
    /// Expired sessions are kept this long so the next message can still
    /// be told the form expired; afterwards the sweep frees them.
    pub retention_secs: u64,
    /// Locale for users without a stored preference.
    pub default_locale: Locale,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 900,
            retention_secs: 86_400,
            default_locale: Locale::Hi,
        }
    }
}

/// Session state, locks and preferences, cloned into each handler.
#[derive(Clone)]
pub struct IntakeContext {
    pub sessions: Arc<dyn SessionStore>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub locks: UserLocks,
    pub settings: IntakeSettings,
}

impl IntakeContext {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        preferences: Arc<dyn PreferenceStore>,
        locks: UserLocks,
        settings: IntakeSettings,
    ) -> Self {
        Self {
            sessions,
            preferences,
            locks,
            settings,
        }
    }

    /// The user's preferred locale, or the default.
    ///
    /// A failing preference store degrades to the default; replies are
    /// still sent.
    pub async fn locale_for(&self, user_id: &UserId) -> Locale {
        match self.preferences.get(user_id).await {
            Ok(Some(pref)) => pref.locale,
            Ok(None) => self.settings.default_locale,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Preference lookup failed, using default locale");
                self.settings.default_locale
            }
        }
    }

    /// Frees sessions idle past the retention window and unused user locks.
    ///
    /// Sessions that merely passed the idle timeout are left alone; the
    /// user's next message turns them into an expiry notice.
    pub async fn sweep(&self, now: &Timestamp) -> Result<SweepReport, SessionStoreError> {
        let retention = self.settings.retention_secs.max(self.settings.idle_timeout_secs);
        let purged_sessions = self.sessions.purge_idle(now, retention).await?;
        let pruned_locks = self.locks.prune();
        if purged_sessions > 0 || pruned_locks > 0 {
            info!(purged_sessions, pruned_locks, "Swept idle sessions");
        }
        Ok(SweepReport {
            purged_sessions,
            pruned_locks,
        })
    }
}

/// What one [`IntakeContext::sweep`] removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub purged_sessions: usize,
    pub pruned_locks: usize,
}
