//! Runtime configuration sourced from the environment.
//!
//! Every setting has a hard default and is overridden by a `FINCACHE_*`
//! variable; unparsable values fall back to the default with a warning, so
//! configuration can never prevent startup. `Config::load` honors a local
//! `.env` file before reading the environment.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Target host when `FINCACHE_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Per-request abort threshold.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

/// TTL for the organizations cache slot.
const DEFAULT_CACHE_DURATION_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for all API calls.
    pub api_base_url: String,
    /// Abort threshold applied to every request.
    pub request_timeout: Duration,
    /// How long a cached organization list stays valid.
    pub cache_duration: Duration,
    /// Static login credentials; unset entries never match.
    pub credentials: StaticCredentials,
}

/// The two configured login pairs. There is no account system behind these -
/// one admin and one regular user, both set through the environment.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    pub admin_login: Option<String>,
    pub admin_password: Option<String>,
    pub user_login: Option<String>,
    pub user_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            cache_duration: Duration::from_millis(DEFAULT_CACHE_DURATION_MS),
            credentials: StaticCredentials::default(),
        }
    }
}

impl Config {
    /// Load a local `.env` file if present, then read the environment.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("FINCACHE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout: duration_from_env("FINCACHE_API_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS),
            cache_duration: duration_from_env(
                "FINCACHE_CACHE_DURATION_MS",
                DEFAULT_CACHE_DURATION_MS,
            ),
            credentials: StaticCredentials {
                admin_login: env::var("FINCACHE_ADMIN_LOGIN").ok(),
                admin_password: env::var("FINCACHE_ADMIN_PASSWORD").ok(),
                user_login: env::var("FINCACHE_USER_LOGIN").ok(),
                user_password: env::var("FINCACHE_USER_PASSWORD").ok(),
            },
        }
    }
}

fn duration_from_env(name: &str, default_ms: u64) -> Duration {
    let ms = match env::var(name) {
        Ok(raw) => parse_millis(&raw).unwrap_or_else(|| {
            warn!(var = name, value = %raw, "invalid duration, using default");
            default_ms
        }),
        Err(_) => default_ms,
    };
    Duration::from_millis(ms)
}

fn parse_millis(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
