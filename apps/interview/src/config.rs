use std::time::Duration;

use thiserror::Error;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set")]
    Missing(&'static str),

    #[error("Environment variable '{key}' has an invalid value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// How the provider credential is attached to outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>` (OpenAI and compatible providers).
    Bearer,
    /// `api-key: <key>` (Azure OpenAI deployments).
    ApiKey,
}

impl AuthStyle {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(AuthStyle::Bearer),
            "api-key" | "api_key" | "azure" => Ok(AuthStyle::ApiKey),
            other => Err(ConfigError::Invalid {
                key: "LLM_AUTH_STYLE",
                reason: format!("expected 'bearer' or 'api-key', got '{other}'"),
            }),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup aborts if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub llm: LlmConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Connection settings for the text-completion provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub auth_style: AuthStyle,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => 8080,
        };

        let timeout_secs = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "LLM_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "LLM_TIMEOUT_SECS",
                reason: "must be at least 1 second".to_string(),
            });
        }

        let auth_style = match lookup("LLM_AUTH_STYLE") {
            Some(raw) => AuthStyle::parse(&raw)?,
            None => AuthStyle::Bearer,
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            llm: LlmConfig {
                api_url: require("LLM_API_URL")?,
                api_key: require("LLM_API_KEY")?,
                model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                auth_style,
                timeout: Duration::from_secs(timeout_secs),
            },
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/interview"),
        ("LLM_API_URL", "https://llm.example.com/v1/chat/completions"),
        ("LLM_API_KEY", "sk-test"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(REQUIRED)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.auth_style, AuthStyle::Bearer);
        assert_eq!(config.llm.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_missing_credential_fails_fast() {
        let pairs: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != "LLM_API_KEY")
            .collect();
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("LLM_API_KEY")));
    }

    #[test]
    fn test_blank_endpoint_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs.retain(|(k, _)| *k != "LLM_API_URL");
        pairs.push(("LLM_API_URL", "   "));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("LLM_API_URL")));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_azure_auth_style() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("LLM_AUTH_STYLE", "api-key"));
        pairs.push(("LLM_TIMEOUT_SECS", "15"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.llm.auth_style, AuthStyle::ApiKey);
        assert_eq!(config.llm.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("LLM_TIMEOUT_SECS", "0"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "LLM_TIMEOUT_SECS", .. }));
    }

    #[test]
    fn test_unknown_auth_style_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("LLM_AUTH_STYLE", "basic"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }
}
