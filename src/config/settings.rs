use std::fmt;
use std::str::FromStr;

use crate::config::EnvironmentProvider;
use crate::config::errors::SettingsError;

/// Deployment mode; only development enables the elevation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, AppEnvironment::Production)
    }
}

impl FromStr for AppEnvironment {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnvironment::Development),
            "production" | "prod" => Ok(AppEnvironment::Production),
            other => Err(SettingsError::invalid(
                "APP_ENV",
                format!("expected 'development' or 'production', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnvironment::Development => f.write_str("development"),
            AppEnvironment::Production => f.write_str("production"),
        }
    }
}

/// Non-secret runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    database_url: String,
    server_host: String,
    server_port: u16,
    app_env: AppEnvironment,
    session_ttl_hours: i64,
    cors_allowed_origin: String,
}

const DEFAULT_DATABASE_URL: &str = "sqlite://ticketdesk.db?mode=rwc";
const MAX_SESSION_TTL_HOURS: i64 = 720;

impl Settings {
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, SettingsError> {
        let get = |key: &str, default: &str| {
            env.get_var(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let database_url = get("DATABASE_URL", DEFAULT_DATABASE_URL);

        let server_host = get("HOST", "0.0.0.0");
        server_host
            .parse::<std::net::IpAddr>()
            .map_err(|e| SettingsError::parse("HOST", e))?;

        let server_port = get("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| SettingsError::parse("PORT", e))?;
        if server_port == 0 {
            return Err(SettingsError::invalid("PORT", "must be between 1 and 65535"));
        }

        let app_env = get("APP_ENV", "production").parse::<AppEnvironment>()?;

        let session_ttl_hours = get("SESSION_TTL_HOURS", "24")
            .parse::<i64>()
            .map_err(|e| SettingsError::parse("SESSION_TTL_HOURS", e))?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(SettingsError::invalid(
                "SESSION_TTL_HOURS",
                format!("must be between 1 and {}", MAX_SESSION_TTL_HOURS),
            ));
        }

        let cors_allowed_origin = get("CORS_ALLOWED_ORIGIN", "http://localhost:3000");

        Ok(Self {
            database_url,
            server_host,
            server_port,
            app_env,
            session_ttl_hours,
            cors_allowed_origin,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn app_env(&self) -> AppEnvironment {
        self.app_env
    }

    pub fn session_ttl_hours(&self) -> i64 {
        self.session_ttl_hours
    }

    pub fn cors_allowed_origin(&self) -> &str {
        &self.cors_allowed_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let settings = Settings::from_env_provider(&MockEnvironment::empty()).unwrap();

        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.bind_address(), "0.0.0.0:3000");
        assert_eq!(settings.app_env(), AppEnvironment::Production);
        assert_eq!(settings.session_ttl_hours(), 24);
        assert_eq!(settings.cors_allowed_origin(), "http://localhost:3000");
    }

    #[test]
    fn test_overrides_are_applied() {
        let env = MockEnvironment::empty().with_vars(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("APP_ENV", "Development"),
            ("SESSION_TTL_HOURS", "2"),
        ]);
        let settings = Settings::from_env_provider(&env).unwrap();

        assert_eq!(settings.database_url(), "sqlite::memory:");
        assert_eq!(settings.bind_address(), "127.0.0.1:8080");
        assert_eq!(settings.app_env(), AppEnvironment::Development);
        assert_eq!(settings.session_ttl_hours(), 2);
    }

    #[test]
    fn test_unknown_app_env_is_rejected() {
        let env = MockEnvironment::empty().with_var("APP_ENV", "staging");
        let result = Settings::from_env_provider(&env);

        assert!(matches!(result, Err(SettingsError::InvalidSetting { .. })));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        for port in ["0", "70000", "abc"] {
            let env = MockEnvironment::empty().with_var("PORT", port);
            assert!(Settings::from_env_provider(&env).is_err(), "port {} accepted", port);
        }
    }

    #[test]
    fn test_session_ttl_out_of_range_is_rejected() {
        let env = MockEnvironment::empty().with_var("SESSION_TTL_HOURS", "0");
        assert!(Settings::from_env_provider(&env).is_err());

        let env = MockEnvironment::empty().with_var("SESSION_TTL_HOURS", "1000");
        assert!(Settings::from_env_provider(&env).is_err());
    }
}
