use std::fmt;

use crate::config::{EnvironmentProvider, SecretConfig, SecretType};

/// Secret-related startup failures
#[derive(Debug)]
pub enum SecretError {
    Missing { secret_name: String },
    InvalidLength { secret_name: String, expected: usize, actual: usize },
}

impl SecretError {
    pub fn missing(secret_name: &str) -> Self {
        Self::Missing {
            secret_name: secret_name.to_string(),
        }
    }

    pub fn invalid_length(secret_name: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            secret_name: secret_name.to_string(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { secret_name } => {
                write!(f, "Required secret '{}' is missing", secret_name)
            }
            Self::InvalidLength { secret_name, expected, actual } => {
                write!(
                    f,
                    "Secret '{}' must be at least {} characters, got {}",
                    secret_name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SecretError {}

/// Centralized holder for application secrets
pub struct SecretManager {
    session_secret: String,
    password_pepper: String,
    elevate_admin_secret: Option<String>,
}

impl SecretManager {
    /// Load and validate all secrets
    ///
    /// # Errors
    /// Returns `SecretError` if a required secret is missing or too short
    pub fn init(env: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let session_secret = Self::load_secret(env, &Self::session_secret_config())?
            .ok_or_else(|| SecretError::missing("SECRET_KEY"))?;
        let password_pepper = Self::load_secret(env, &Self::pepper_config())?
            .ok_or_else(|| SecretError::missing("PASSWORD_PEPPER"))?;
        let elevate_admin_secret = Self::load_secret(env, &Self::elevation_config())?;

        if elevate_admin_secret.is_none() {
            tracing::debug!("ELEVATE_ADMIN_SECRET not set; elevation endpoint will reject every request");
        }

        Ok(Self {
            session_secret,
            password_pepper,
            elevate_admin_secret,
        })
    }

    /// Keys the HMAC over session tokens
    fn session_secret_config() -> SecretConfig {
        SecretConfig::env_var("SECRET_KEY").required(true).min_length(32)
    }

    fn pepper_config() -> SecretConfig {
        SecretConfig::env_var("PASSWORD_PEPPER").required(true).min_length(16)
    }

    fn elevation_config() -> SecretConfig {
        SecretConfig::env_var("ELEVATE_ADMIN_SECRET").required(false)
    }

    pub fn session_secret(&self) -> &str {
        &self.session_secret
    }

    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    pub fn elevate_admin_secret(&self) -> Option<&str> {
        self.elevate_admin_secret.as_deref()
    }

    /// Load a secret based on its configuration
    ///
    /// Returns `Ok(None)` for an absent optional secret. Empty values count as absent.
    pub(crate) fn load_secret(
        env: &dyn EnvironmentProvider,
        config: &SecretConfig,
    ) -> Result<Option<String>, SecretError> {
        let value = match &config.secret_type {
            SecretType::EnvVar { name } => env.get_var(name).filter(|v| !v.is_empty()),
        };

        let value = match value {
            Some(v) => v,
            None if !config.required => return Ok(None),
            None => return Err(SecretError::missing(config.secret_type.name())),
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(SecretError::invalid_length(
                    config.secret_type.name(),
                    min_len,
                    value.len(),
                ));
            }
        }

        Ok(Some(value))
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("session_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .field(
                "elevate_admin_secret",
                &self.elevate_admin_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded = 2 + usize::from(self.elevate_admin_secret.is_some());
        write!(f, "SecretManager {{ secrets_loaded: {} }}", loaded)
    }
}
