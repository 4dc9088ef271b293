//! Configuration for the task store client and the board view.
//!
//! Values are passed explicitly into the components that use them. Nothing
//! here is global or mutable after construction.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable naming the task store base URL.
pub const BASE_URL_VAR: &str = "TASKBOARD_API_BASE_URL";

/// Environment variable naming the request timeout in whole seconds.
pub const TIMEOUT_SECS_VAR: &str = "TASKBOARD_API_TIMEOUT_SECS";

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while building configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL is malformed or cannot carry path segments.
    #[error("invalid task store base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The timeout is not a positive whole number of seconds.
    #[error("invalid task store timeout '{0}', expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Connection settings for the HTTP task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    base_url: Url,
    timeout: Duration,
}

impl StoreConfig {
    /// Creates a configuration from a raw base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the URL does not parse or
    /// is not an `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a key holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let mut config = Self::new(&base_url)?;
        if let Some(raw_timeout) = lookup(TIMEOUT_SECS_VAR) {
            let seconds = raw_timeout
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or(ConfigError::InvalidTimeout(raw_timeout))?;
            config = config.with_timeout(Duration::from_secs(seconds));
        }
        Ok(config)
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_owned()))?;
    let is_http = matches!(url.scheme(), "http" | "https");
    if !is_http || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(url)
}

/// Retry settings for callers that wrap a store in
/// [`RetryingTaskStore`](crate::board::adapters::retry::RetryingTaskStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on every further retry.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a retry policy.
    #[must_use]
    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(250))
    }
}

/// Presentation flags for the board view.
///
/// These are handed to the session when the view is built instead of being
/// read from shared global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardViewConfig {
    /// Whether the navigation sidebar is collapsed.
    pub sidebar_collapsed: bool,
    /// Whether the dark theme is active.
    pub dark_mode: bool,
}
