//! Application configuration
//!
//! Centralized configuration management using the `config` crate.
//! Values come from built-in defaults, optional `config/` files, and
//! `PAHANA__`-prefixed environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Authentication configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// JWT token expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_secs: i64,

    /// Seed admin password used when the user store starts empty
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

fn default_jwt_secret() -> String {
    "pahana-books-secret-key-change-in-production".to_string()
}

fn default_jwt_expiration() -> i64 {
    86400 // 24 hours
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

/// CORS configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: String,
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

impl AppConfig {
    /// Load configuration from defaults, config files, and environment
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("auth.jwt_secret", default_jwt_secret())?
            .set_default("auth.jwt_expiration_secs", 86400)?
            .set_default("auth.admin_password", default_admin_password())?
            .set_default("cors.allowed_origins", default_cors_origins())?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with PAHANA_ prefix
            .add_source(
                Environment::with_prefix("PAHANA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let config = AppConfig::load().expect("defaults should load");
        assert!(!config.auth.jwt_secret.is_empty());
        assert!(config.auth.jwt_expiration_secs > 0);
        assert!(config.server_addr().contains(':'));
    }
}
