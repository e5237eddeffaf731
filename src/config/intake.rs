//! Dialogue configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::IntakeSettings;
use crate::domain::foundation::Locale;

#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Seconds of silence after which an active form expires
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Seconds an expired form is kept so the user still hears it expired
    #[serde(default = "default_session_retention")]
    pub session_retention_secs: u64,

    /// Reply locale for users who never chose one
    #[serde(default)]
    pub default_locale: Locale,
}

impl IntakeConfig {
    pub fn settings(&self) -> IntakeSettings {
        IntakeSettings {
            idle_timeout_secs: self.idle_timeout_secs,
            retention_secs: self.session_retention_secs,
            default_locale: self.default_locale,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(60..=86_400).contains(&self.idle_timeout_secs) {
            return Err(ValidationError::InvalidIdleTimeout);
        }
        if self.session_retention_secs < self.idle_timeout_secs {
            return Err(ValidationError::RetentionShorterThanTimeout);
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            session_retention_secs: default_session_retention(),
            default_locale: Locale::default(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    900
}

fn default_session_retention() -> u64 {
    86_400
}
