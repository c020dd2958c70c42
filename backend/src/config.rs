//! Application configuration.
//!
//! Settings come from `healtsync.toml` (path in `HEALTSYNC_CONFIG`, or the
//! first of `./healtsync.toml`, `./backend/healtsync.toml`,
//! `../healtsync.toml`), then environment variables override single values:
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `HOST`, `PORT` | `server.host`, `server.port` |
//! | `APP_ENV` | `server.environment` |
//! | `AUTH_ENABLED`, `JWT_SECRET` | `auth.enabled`, `auth.jwt_secret` |
//! | `REPOSITORY_TYPE` | `repository.type` |
//! | `DATABASE_URL` / `PG_DATABASE_URL` | `postgres.database_url` |
//! | `PG_POOL_MAX`, `PG_POOL_MIN` | `postgres.max_connections`, `postgres.min_connections` |
//!
//! A missing file is not an error; defaults apply.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::db::repo_config::{PostgresSettings, RepositoryConfig, RepositorySettings};

pub const CONFIG_ENV: &str = "HEALTSYNC_CONFIG";
pub const CONFIG_FILE: &str = "healtsync.toml";

const SEARCH_PATHS: [&str; 3] = ["healtsync.toml", "backend/healtsync.toml", "../healtsync.toml"];

/// Secret shipped in the sample config; never acceptable in production.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("Unknown environment: {}", other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// Request body limit in MiB.
    pub body_limit_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            body_limit_mb: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// When false every request is treated as an administrator.
    pub enabled: bool,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_minutes: 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            bootstrap_admin_email: None,
            bootstrap_admin_password: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub postgres: PostgresSettings,
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Locate, read and override the configuration.
    pub fn load() -> Result<Self> {
        let mut config = match Self::locate() {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                info!("No {} found, using defaults", CONFIG_FILE);
                Self::default()
            }
        };
        config.apply_env_overrides()?;
        config.check()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `HEALTSYNC_CONFIG` wins over the search paths.
    pub fn locate() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }
        SEARCH_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.is_file())
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_parse("PORT")? {
            self.server.port = port;
        }
        if let Some(environment) = env_parse("APP_ENV")? {
            self.server.environment = environment;
        }
        if let Some(enabled) = env_parse("AUTH_ENABLED")? {
            self.auth.enabled = enabled;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(repo_type) = std::env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(url) = std::env::var("DATABASE_URL").or_else(|_| std::env::var("PG_DATABASE_URL"))
        {
            self.postgres.database_url = url;
        }
        if let Some(max) = env_parse("PG_POOL_MAX")? {
            self.postgres.max_connections = max;
        }
        if let Some(min) = env_parse("PG_POOL_MIN")? {
            self.postgres.min_connections = min;
        }
        Ok(())
    }

    /// Reject settings the server cannot run with.
    pub fn check(&self) -> Result<()> {
        self.repository_config()
            .repository_type()
            .map_err(anyhow::Error::msg)?;

        if self.auth.enabled && self.auth.jwt_secret.trim().is_empty() {
            anyhow::bail!("auth.jwt_secret must be set when authentication is enabled");
        }
        if self.auth.jwt_secret == DEFAULT_JWT_SECRET {
            if self.is_production() && self.auth.enabled {
                anyhow::bail!("auth.jwt_secret must be changed in production");
            }
            warn!("Using the default JWT secret; set JWT_SECRET outside development");
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            anyhow::bail!("auth.bcrypt_cost must be between 4 and 31");
        }
        if self.auth.token_ttl_minutes <= 0 {
            anyhow::bail!("auth.token_ttl_minutes must be positive");
        }
        Ok(())
    }

    pub fn repository_config(&self) -> RepositoryConfig {
        RepositoryConfig {
            repository: self.repository.clone(),
            postgres: self.postgres.clone(),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid bind address {}:{}",
                    self.server.host, self.server.port
                )
            })
    }

    pub fn is_development(&self) -> bool {
        self.server.environment == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        self.server.environment == Environment::Production
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.server.body_limit_mb.saturating_mul(1024 * 1024)
    }

    /// Admin credentials to bootstrap, when both are configured.
    pub fn bootstrap_admin(&self) -> Option<(&str, &str)> {
        match (
            self.auth.bootstrap_admin_email.as_deref(),
            self.auth.bootstrap_admin_password.as_deref(),
        ) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml(
            r#"
[server]
host = "127.0.0.1"
port = 9000
environment = "production"

[auth]
jwt_secret = "s3cret"
bcrypt_cost = 10

[repository]
type = "postgres"

[postgres]
database_url = "postgres://localhost/healtsync"
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert!(config.is_production());
        assert_eq!(config.auth.token_ttl_minutes, 60);
        assert!(config.auth.enabled);
        assert_eq!(config.repository.repo_type, "postgres");
        assert_eq!(config.repository_config().postgres.max_connections, 10);
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.is_development());
        assert_eq!(config.body_limit_bytes(), 2 * 1024 * 1024);
        assert!(config.bootstrap_admin().is_none());
    }

    #[test]
    fn test_default_secret_rejected_in_production() {
        let mut config = AppConfig::default();
        assert!(config.check().is_ok());
        config.server.environment = Environment::Production;
        assert!(config.check().is_err());
        config.auth.jwt_secret = "rotated".to_string();
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_unknown_repository_type_rejected() {
        let mut config = AppConfig::default();
        config.repository.repo_type = "sqlite".to_string();
        assert!(config.check().is_err());
    }

    #[test]
    fn test_bootstrap_admin_needs_both_values() {
        let mut config = AppConfig::default();
        config.auth.bootstrap_admin_email = Some("root@clinic.org".to_string());
        assert!(config.bootstrap_admin().is_none());
        config.auth.bootstrap_admin_password = Some("long-password".to_string());
        assert_eq!(
            config.bootstrap_admin(),
            Some(("root@clinic.org", "long-password"))
        );
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
    }
}
