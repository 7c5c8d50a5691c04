//! Configuration loading and resolution.
//!
//! Every setting resolves as: explicit flag, then environment variable, then
//! the built-in constant.

pub mod endpoints;

use std::time::Duration;

pub use endpoints::Endpoints;

use crate::fetch::RetryPolicy;
use crate::types::{ServerError, ServerResult};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:9999";
pub const DEFAULT_ATTEMPTS: u32 = 10;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

pub const ENV_ADDR: &str = "FIZZ_SUBTEXT_ADDR";
pub const ENV_SCHEME: &str = "FIZZ_SUBTEXT_SCHEME";
pub const ENV_HOST: &str = "FIZZ_SUBTEXT_HOST";
pub const ENV_ATTEMPTS: &str = "FIZZ_SUBTEXT_ATTEMPTS";
pub const ENV_RETRY_DELAY_MS: &str = "FIZZ_SUBTEXT_RETRY_DELAY_MS";
pub const ENV_CANDIDATE: &str = "FIZZ_SUBTEXT_CANDIDATE";

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub addr: Option<String>,
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub candidate: Option<String>,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub endpoints: Endpoints,
    pub retry: RetryPolicy,
    pub candidate: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            endpoints: Endpoints::default(),
            retry: RetryPolicy::default(),
            candidate: endpoints::DEFAULT_CANDIDATE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolve against the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> ServerResult<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary variable lookup.
    pub fn resolve_with<F>(overrides: ConfigOverrides, env: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = overrides
            .addr
            .or_else(|| env(ENV_ADDR))
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        let scheme = overrides
            .scheme
            .or_else(|| env(ENV_SCHEME))
            .unwrap_or_else(|| endpoints::DEFAULT_SCHEME.to_string());
        let host = overrides
            .host
            .or_else(|| env(ENV_HOST))
            .unwrap_or_else(|| endpoints::DEFAULT_HOST.to_string());

        let attempts = match overrides.attempts {
            Some(n) => n,
            None => parse_env(&env, ENV_ATTEMPTS)?.unwrap_or(DEFAULT_ATTEMPTS),
        };
        let delay_ms = match overrides.retry_delay_ms {
            Some(ms) => ms,
            None => parse_env(&env, ENV_RETRY_DELAY_MS)?.unwrap_or(DEFAULT_RETRY_DELAY_MS),
        };

        let candidate = overrides
            .candidate
            .or_else(|| env(ENV_CANDIDATE))
            .unwrap_or_else(|| endpoints::DEFAULT_CANDIDATE.to_string());

        Ok(Self {
            listen_addr,
            endpoints: Endpoints::new(&scheme, &host),
            retry: RetryPolicy::new(attempts, Duration::from_millis(delay_ms)),
            candidate,
        })
    }
}

fn parse_env<F, T>(env: &F, key: &str) -> ServerResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ServerError::Config(format!("{key}={raw:?}: {e}"))),
    }
}
