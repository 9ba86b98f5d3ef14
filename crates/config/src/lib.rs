use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "staffdesk.toml",
    "config/staffdesk.toml",
    "crates/config/staffdesk.toml",
    "../staffdesk.toml",
    "../config/staffdesk.toml",
    "../crates/config/staffdesk.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/staffdesk".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric signing secret for bearer tokens. Has no default; startup
    /// fails when it is left empty.
    #[serde(default)]
    pub secret: String,
    /// Reserved administrative identity. Registration with this email is
    /// rejected and the bootstrap credential is created under it.
    #[serde(default = "AuthConfig::default_admin_email")]
    pub admin_email: String,
    /// Bootstrap password for the administrative credential. Bootstrap is
    /// skipped when empty.
    #[serde(default)]
    pub admin_password: String,
    #[serde(default = "AuthConfig::default_token_ttl")]
    pub token_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            admin_email: Self::default_admin_email(),
            admin_password: String::new(),
            token_ttl_seconds: Self::default_token_ttl(),
        }
    }
}

impl AuthConfig {
    fn default_admin_email() -> String {
        "admin@gmail.com".to_string()
    }

    const fn default_token_ttl() -> u64 {
        3_600
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// Reject configurations that cannot produce a working backend. A missing
    /// signing secret is a startup failure, never a per-request one.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.secret.is_empty() {
            anyhow::bail!("auth.secret is not configured; set STAFFDESK__AUTH__SECRET or add it to staffdesk.toml");
        }
        if self.database.url.is_empty() {
            anyhow::bail!("database.url is not configured");
        }
        if self.cors.allowed_origin.is_empty() {
            anyhow::bail!("cors.allowed_origin is not configured");
        }
        Ok(())
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .unwrap()
        .set_default("auth.secret", defaults.auth.secret.clone())
        .unwrap()
        .set_default("auth.admin_email", defaults.auth.admin_email.clone())
        .unwrap()
        .set_default("auth.admin_password", defaults.auth.admin_password.clone())
        .unwrap()
        .set_default(
            "auth.token_ttl_seconds",
            i64::try_from(defaults.auth.token_ttl_seconds).unwrap_or(i64::MAX),
        )
        .unwrap()
        .set_default("cors.allowed_origin", defaults.cors.allowed_origin.clone())
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("STAFFDESK").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("STAFFDESK_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via STAFFDESK_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(address = %config.http.address, port = config.http.port, "loaded backend configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_everything_but_the_secret() {
        let config = AppConfig::default();

        assert_eq!(config.http.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.token_ttl_seconds, 3_600);
        assert_eq!(config.auth.admin_email, "admin@gmail.com");
        assert_eq!(config.cors.allowed_origin, "http://localhost:3000");
        assert!(config.auth.secret.is_empty());
    }

    #[test]
    fn validation_rejects_missing_secret() {
        let config = AppConfig::default();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("auth.secret"));
    }

    #[test]
    fn validation_accepts_configured_secret() {
        let mut config = AppConfig::default();
        config.auth.secret = "test-signing-secret".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.auth.secret = "test-signing-secret".to_string();
        config.database.url = String::new();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("database.url"));
    }
}
