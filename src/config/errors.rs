use std::fmt;

use super::secret_manager::SecretError;

/// Configuration problems detected at startup
#[derive(Debug)]
pub enum SettingsError {
    InvalidSetting { setting_name: String, reason: String },
    ParseError { setting_name: String, error: String },
    Secret(SecretError),
}

impl SettingsError {
    pub fn invalid(setting_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn parse(setting_name: &str, error: impl fmt::Display) -> Self {
        Self::ParseError {
            setting_name: setting_name.to_string(),
            error: error.to_string(),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { setting_name, reason } => {
                write!(f, "Invalid setting '{}': {}", setting_name, reason)
            }
            Self::ParseError { setting_name, error } => {
                write!(f, "Failed to parse setting '{}': {}", setting_name, error)
            }
            Self::Secret(err) => write!(f, "Secret error: {}", err),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Secret(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SecretError> for SettingsError {
    fn from(err: SecretError) -> Self {
        Self::Secret(err)
    }
}
