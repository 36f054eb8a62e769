//! Configuration management for the job board backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: JOBBOARD__)
//! 4. Legacy plain variables
//!    (POSTGRES_DSN, JWT_SECRET, RESUME_API_KEY, PORT)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default token lifetime: 72 hours
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 72 * 60 * 60;

/// Default whole-request deadline enforced by the router
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default résumé parser endpoint
pub const DEFAULT_RESUME_PARSER_URL: &str = "https://api.apilayer.com/resume_parser/upload";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub resume_parser: ResumeParserConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests still running after this many seconds are cut off with 408.
    pub request_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry_secs: i64,
}

/// External résumé parser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeParserConfig {
    pub url: String,
    /// Optional at boot; uploads fail with 500 while unset.
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ResumeParserConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RESUME_PARSER_URL.to_string(),
            api_key: None,
            timeout_secs: 20,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
            },
            jwt: JwtConfig {
                secret: String::new(),
                token_expiry_secs: DEFAULT_TOKEN_EXPIRY_SECS,
            },
            resume_parser: ResumeParserConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with JOBBOARD__ prefix
    /// 4. POSTGRES_DSN, JWT_SECRET, RESUME_API_KEY and PORT
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., JOBBOARD__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("JOBBOARD").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.apply_legacy_env(|key| env::var(key).ok());
        app_config.validate()?;

        Ok(app_config)
    }

    /// Apply the legacy un-prefixed variable names
    pub fn apply_legacy_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("POSTGRES_DSN") {
            self.database.url = url;
        }
        if let Some(secret) = non_empty("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Some(key) = non_empty("RESUME_API_KEY") {
            self.resume_parser.api_key = Some(key);
        }
        if let Some(port) = non_empty("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Reject configurations the service cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            anyhow::bail!("database url is required (set POSTGRES_DSN or JOBBOARD__DATABASE__URL)");
        }
        if self.jwt.secret.trim().is_empty() {
            anyhow::bail!("JWT secret is required (set JWT_SECRET or JOBBOARD__JWT__SECRET)");
        }
        if self.jwt.token_expiry_secs <= 0 {
            anyhow::bail!("jwt.token_expiry_secs must be positive");
        }
        // A parser call must fail on its own deadline, as a JSON 500, before
        // the router gives up on the whole request
        if self.resume_parser.timeout_secs == 0
            || self.resume_parser.timeout_secs >= self.server.request_timeout_secs
        {
            anyhow::bail!(
                "resume_parser.timeout_secs ({}) must be between 1 and server.request_timeout_secs ({})",
                self.resume_parser.timeout_secs,
                self.server.request_timeout_secs
            );
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = "postgres://localhost/job_board".to_string();
        config.jwt.secret = "secret".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.resume_parser.timeout_secs, 20);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.jwt.token_expiry_secs, 72 * 3600);
        assert_eq!(config.resume_parser.url, DEFAULT_RESUME_PARSER_URL);
        assert!(config.resume_parser.api_key.is_none());
    }

    #[test]
    fn test_missing_secret_or_dsn_is_fatal() {
        assert!(AppConfig::default().validate().is_err());

        let mut config = valid_config();
        config.jwt.secret = String::new();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.database.url = "  ".to_string();
        assert!(config.validate().is_err());

        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_parser_timeout_must_undercut_request_timeout() {
        let config = valid_config();
        assert!(config.resume_parser.timeout_secs < config.server.request_timeout_secs);

        let mut config = valid_config();
        config.resume_parser.timeout_secs = 60;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.resume_parser.timeout_secs = config.server.request_timeout_secs;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.resume_parser.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.server.request_timeout_secs = 90;
        config.resume_parser.timeout_secs = 60;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_parser_key_is_not_fatal() {
        let config = valid_config();
        assert!(config.resume_parser.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_legacy_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("POSTGRES_DSN", "postgres://db/jobs"),
            ("JWT_SECRET", "s3cr3t"),
            ("RESUME_API_KEY", "key-123"),
            ("PORT", "9090"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_legacy_env(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.database.url, "postgres://db/jobs");
        assert_eq!(config.jwt.secret, "s3cr3t");
        assert_eq!(config.resume_parser.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_legacy_env_ignores_empty_and_invalid_values() {
        let mut config = valid_config();
        config.apply_legacy_env(|k| match k {
            "JWT_SECRET" => Some(String::new()),
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        });

        assert_eq!(config.jwt.secret, "secret");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_is_production() {
        assert!(!AppConfig::is_production());
    }
}
