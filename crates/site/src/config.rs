//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_BASE_URL` - Public URL (default: `http://{host}:{port}`)
//! - `SITE_STATIC_DIR` - Directory served at `/static` (default: crates/site/static)
//! - `MOCK_AUTH_DELAY_MS` - Simulated identity provider latency (default: 100)
//! - `MOCK_CATALOG_DELAY_MS` - Simulated product store latency (default: 500)
//! - `SESSION_MAX_ENTRIES` - Sessions kept in memory before eviction (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

const DEFAULT_SESSION_CAPACITY: u64 = 10_000;

/// Latency of the mock backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDelays {
    /// Delay applied to every identity provider call.
    pub auth: Duration,
    /// Delay before the product store yields its initial list.
    pub catalog: Duration,
}

impl Default for MockDelays {
    fn default() -> Self {
        Self {
            auth: Duration::from_millis(100),
            catalog: Duration::from_millis(500),
        }
    }
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Directory with CSS and other static assets
    pub static_dir: PathBuf,
    /// Simulated backend latency
    pub delays: MockDelays,
    /// Upper bound on sessions held by the in-memory store
    pub session_capacity: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or("SITE_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_env_or("SITE_PORT", 3000_u16)?;

        let base_url =
            get_optional_env("SITE_BASE_URL").unwrap_or_else(|| format!("http://{host}:{port}"));
        let static_dir =
            PathBuf::from(get_env_or_default("SITE_STATIC_DIR", "crates/site/static"));

        let defaults = MockDelays::default();
        let delays = MockDelays {
            auth: parse_millis("MOCK_AUTH_DELAY_MS", defaults.auth)?,
            catalog: parse_millis("MOCK_CATALOG_DELAY_MS", defaults.catalog)?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            delays,
            session_capacity: parse_env_or("SESSION_MAX_ENTRIES", DEFAULT_SESSION_CAPACITY)?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE", 0.1)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (controls secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let host = IpAddr::from([127, 0, 0, 1]);
        let port = 3000;
        Self {
            host,
            port,
            base_url: format!("http://{host}:{port}"),
            static_dir: PathBuf::from("crates/site/static"),
            delays: MockDelays::default(),
            session_capacity: DEFAULT_SESSION_CAPACITY,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a millisecond duration.
#[allow(clippy::cast_possible_truncation)] // Configured delays are far below u64::MAX ms
fn parse_millis(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    parse_env_or(key, default.as_millis() as u64).map(Duration::from_millis)
}

/// Parse a sample rate in `[0.0, 1.0]`.
fn parse_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let rate = parse_env_or(key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
