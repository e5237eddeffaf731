//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables carry the `GRAMIN_SAHAYAK`
//! prefix and nested values are separated by a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use gramin_sahayak::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod classifier;
mod delivery;
mod error;
mod intake;
mod server;

pub use classifier::{ClassifierBackend, ClassifierConfig};
pub use delivery::DeliveryConfig;
pub use error::{ConfigError, ValidationError};
pub use intake::IntakeConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Eligibility model
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Dialogue tunables
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Translation and speech
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` when present, then every `GRAMIN_SAHAYAK__…` variable:
    ///
    /// - `GRAMIN_SAHAYAK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `GRAMIN_SAHAYAK__CLASSIFIER__BACKEND=linear_model`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GRAMIN_SAHAYAK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.classifier.validate()?;
        self.intake.validate()?;
        self.delivery.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Locale;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "GRAMIN_SAHAYAK__SERVER__PORT",
        "GRAMIN_SAHAYAK__SERVER__ENVIRONMENT",
        "GRAMIN_SAHAYAK__CLASSIFIER__BACKEND",
        "GRAMIN_SAHAYAK__INTAKE__DEFAULT_LOCALE",
        "GRAMIN_SAHAYAK__INTAKE__IDLE_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.classifier.backend, ClassifierBackend::Http);
        assert_eq!(config.intake.idle_timeout_secs, 900);
        assert_eq!(config.intake.default_locale, Locale::Hi);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("GRAMIN_SAHAYAK__SERVER__PORT", "3000");
        env::set_var("GRAMIN_SAHAYAK__CLASSIFIER__BACKEND", "linear_model");
        env::set_var("GRAMIN_SAHAYAK__INTAKE__DEFAULT_LOCALE", "en");
        env::set_var("GRAMIN_SAHAYAK__INTAKE__IDLE_TIMEOUT_SECS", "600");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.classifier.backend, ClassifierBackend::LinearModel);
        assert_eq!(config.intake.default_locale, Locale::En);
        assert_eq!(config.intake.idle_timeout_secs, 600);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("GRAMIN_SAHAYAK__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }
}
