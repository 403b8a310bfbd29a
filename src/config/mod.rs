//! Runtime configuration.
//!
//! Everything comes from `CRAFT_HAVEN__`-prefixed environment variables, with
//! `__` between section and key. Only the JWT secret is required.

mod auth;
mod database;
mod error;
mod features;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "CRAFT_HAVEN";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection; in-memory stores are used when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Bearer token verification
    pub auth: AuthConfig,

    /// Store policies
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Read configuration from the process environment, after loading a
    /// `.env` file when one exists.
    ///
    /// `CRAFT_HAVEN__SERVER__PORT=8080` sets `server.port`;
    /// `CRAFT_HAVEN__DATABASE__URL` enables the Postgres stores.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(env_source())
    }

    /// Same as [`AppConfig::load`] but reads the given variables instead of
    /// the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::build(env_source().source(Some(vars)))
    }

    fn build(source: config::Environment) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Stops at the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::DanglingLinePolicy;
    use crate::domain::order::StatusTransitionPolicy;
    use secrecy::ExposeSecret;

    const SECRET: (&str, &str) = ("CRAFT_HAVEN__AUTH__JWT_SECRET", "test-secret");

    fn load(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        AppConfig::from_vars(std::iter::once(SECRET).chain(extra.iter().copied()))
    }

    #[test]
    fn secret_alone_is_enough() {
        let config = load(&[]).unwrap();

        assert_eq!(config.auth.jwt_secret.expose_secret(), "test-secret");
        assert_eq!(config.server.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.features, FeatureFlags::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn missing_secret_fails_to_load() {
        let result = AppConfig::from_vars(Vec::<(String, String)>::new());
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn nested_keys_reach_their_sections() {
        let config = load(&[
            ("CRAFT_HAVEN__SERVER__PORT", "3000"),
            ("CRAFT_HAVEN__DATABASE__URL", "postgresql://test@localhost/test"),
            ("CRAFT_HAVEN__FEATURES__STATUS_TRANSITION_POLICY", "strict"),
            ("CRAFT_HAVEN__FEATURES__DANGLING_LINE_POLICY", "mark_unresolvable"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        let database = config.database.expect("database section");
        assert_eq!(database.url.expose_secret(), "postgresql://test@localhost/test");
        assert_eq!(database.max_connections, 20);
        assert_eq!(
            config.features.status_transition_policy,
            StatusTransitionPolicy::Strict
        );
        assert_eq!(
            config.features.dangling_line_policy,
            DanglingLinePolicy::MarkUnresolvable
        );
    }

    #[test]
    fn unprefixed_variables_are_ignored() {
        let config = load(&[("SERVER__PORT", "9999")]).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn production_rejects_short_secret() {
        let config = load(&[("CRAFT_HAVEN__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN))
        );
    }

    #[test]
    fn invalid_database_section_fails_validation() {
        let config = load(&[("CRAFT_HAVEN__DATABASE__URL", "sqlite://shop.db")]).unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }
}
