//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_HOST` - Catalog host name, used for article image URLs
//!
//! ## Optional
//! - `CART_HOST` - Bind address (default: 0.0.0.0)
//! - `CART_PORT` - Listen port (default: 8000)
//! - `CATALOG_API_URL` - Catalog API base URL (default: `https://{CATALOG_HOST}`)
//! - `CATALOG_TIMEOUT_SECS` - Per-request catalog timeout (default: 10)
//! - `CATALOG_MAX_CONCURRENT_LOOKUPS` - Parallel lookups per cart read (default: 8)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog client configuration
    pub catalog: CatalogConfig,
}

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog host name (e.g. shop.example.com)
    pub host: String,
    /// Base URL for catalog API calls
    pub api_url: String,
    /// Transport timeout for a single catalog request
    pub timeout: Duration,
    /// Upper bound on in-flight lookups while enriching one cart
    pub max_concurrent_lookups: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or_default(&lookup, "CART_HOST", "0.0.0.0")?;
        let port = parse_or_default(&lookup, "CART_PORT", "8000")?;
        let catalog = CatalogConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            catalog,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("CATALOG_HOST")
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("CATALOG_HOST".to_string()))?;
        let api_url = lookup("CATALOG_API_URL").unwrap_or_else(|| format!("https://{host}"));
        let timeout_secs: u64 = parse_or_default(lookup, "CATALOG_TIMEOUT_SECS", "10")?;
        let max_concurrent_lookups: usize =
            parse_or_default(lookup, "CATALOG_MAX_CONCURRENT_LOOKUPS", "8")?;

        if max_concurrent_lookups == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_MAX_CONCURRENT_LOOKUPS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            host,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            max_concurrent_lookups,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or_default<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
