//! Configuration module
//!
//! Environment-driven configuration for the uploader service. Values are read
//! once at startup via [`Config::from_env`] and validated before anything else
//! is initialized.

use std::env;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 2 * 1024 * 1024 * 1024; // 2 GiB
const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_STORAGE_PATH: &str = "/var/lib/uploader/uploads";

/// Service configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    /// Base URL of the data acquisition service (callback target)
    pub das_url: String,
    /// Base URL of the user management service (org access checks)
    pub user_management_url: String,
    /// Root directory for the local upload store
    pub storage_path: String,
    /// Request body size limit applied at the HTTP layer
    pub max_upload_size_bytes: usize,
    /// Timeout for outbound HTTP calls (permission checks, callbacks)
    pub http_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from the environment (reading `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = Config {
            server_port: parse_env("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            das_url: env::var("DAS_URL").unwrap_or_else(|_| "http://localhost:8081".to_string()),
            user_management_url: env::var("USER_MANAGEMENT_URL")
                .unwrap_or_else(|_| "http://localhost:8082".to_string()),
            storage_path: env::var("STORAGE_PATH")
                .unwrap_or_else(|_| DEFAULT_STORAGE_PATH.to_string()),
            max_upload_size_bytes: parse_env(
                "MAX_UPLOAD_SIZE_BYTES",
                DEFAULT_MAX_UPLOAD_SIZE_BYTES,
            )?,
            http_timeout_seconds: parse_env("HTTP_TIMEOUT_SECONDS", DEFAULT_HTTP_TIMEOUT_SECONDS)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on misconfiguration before any server state is built.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        for (name, url) in [
            ("DAS_URL", &self.das_url),
            ("USER_MANAGEMENT_URL", &self.user_management_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must be an http(s) URL, got '{}'", name, url);
            }
        }
        if self.max_upload_size_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_SIZE_BYTES must be greater than zero");
        }
        if self.http_timeout_seconds == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECONDS must be greater than zero");
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}
