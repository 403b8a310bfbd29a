//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration (HS256 bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to verify token signatures
    pub jwt_secret: SecretString,

    /// Clock skew tolerated when checking `exp`, in seconds
    #[serde(default)]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// The secret must be present. In production it must also be long
    /// enough to resist brute force.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CRAFT_HAVEN__AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            leeway_secs: 0,
        }
    }

    #[test]
    fn test_validation_missing_secret() {
        assert_eq!(
            config("  ").validate(&Environment::Development),
            Err(ValidationError::MissingRequired("CRAFT_HAVEN__AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_short_secret_allowed_in_development_only() {
        let config = config("dev-secret");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN))
        );
    }

    #[test]
    fn test_long_secret_valid_in_production() {
        let config = config(&"k".repeat(MIN_PRODUCTION_SECRET_LEN));
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let rendered = format!("{:?}", config("super-secret-value"));
        assert!(!rendered.contains("super-secret-value"));
    }

    #[test]
    fn test_leeway_defaults_to_zero() {
        let config: AuthConfig = serde_json::from_str(r#"{"jwt_secret": "abc"}"#).unwrap();
        assert_eq!(config.leeway_secs, 0);
        assert_eq!(config.jwt_secret.expose_secret(), "abc");
    }
}
