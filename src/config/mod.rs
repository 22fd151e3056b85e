//! Configuration module for the brewlog backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Base URL of the public brewery directory.
pub const DEFAULT_DIRECTORY_URL: &str = "https://api.openbrewerydb.org/v1";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared bearer credential for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Base URL of the external brewery directory API
    pub directory_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("BREWLOG_API_PSK").ok();

        let db_path = env::var("BREWLOG_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("BREWLOG_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid BREWLOG_BIND_ADDR format");

        let log_level = env::var("BREWLOG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let directory_url = env::var("BREWLOG_DIRECTORY_URL")
            .unwrap_or_else(|_| DEFAULT_DIRECTORY_URL.to_string());

        Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            directory_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("BREWLOG_API_PSK");
        env::remove_var("BREWLOG_DB_PATH");
        env::remove_var("BREWLOG_BIND_ADDR");
        env::remove_var("BREWLOG_LOG_LEVEL");
        env::remove_var("BREWLOG_DIRECTORY_URL");

        let config = Config::from_env();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.directory_url, DEFAULT_DIRECTORY_URL);
    }
}
