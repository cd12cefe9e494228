//! Polling configuration
//!
//! Defaults match the classic "poll every 50ms until done" behavior. Values can
//! be overlaid from `TIDBITS_*` environment variables and then from builder
//! calls (the CLI maps its flags onto the builder).

use std::time::Duration;

use crate::error::{Result, TidbitsError};

/// Default delay between two requests while the server answers 202
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Default TCP connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_POLL_INTERVAL_MS: &str = "TIDBITS_POLL_INTERVAL_MS";
pub const ENV_MAX_ATTEMPTS: &str = "TIDBITS_MAX_ATTEMPTS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "TIDBITS_REQUEST_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "TIDBITS_USER_AGENT";

/// Configuration for a [`Poller`](crate::poller::Poller)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Fixed delay before re-issuing a request that got 202
    pub poll_interval: Duration,
    /// Cap on the number of requests per chain (initial one included).
    /// `None` polls until the server stops answering 202.
    pub max_attempts: Option<u32>,
    /// Timeout for each individual request. `None` (the default) lets a
    /// request wait as long as the server keeps the connection open.
    pub request_timeout: Option<Duration>,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            request_timeout: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: concat!("tidbits/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PollConfig {
    /// Defaults overlaid with `TIDBITS_*` process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = lookup(ENV_POLL_INTERVAL_MS) {
            let ms: u64 = parse_number(ENV_POLL_INTERVAL_MS, &ms)?;
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(attempts) = lookup(ENV_MAX_ATTEMPTS) {
            config = config.with_max_attempts(parse_number(ENV_MAX_ATTEMPTS, &attempts)?)?;
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs: u64 = parse_number(ENV_REQUEST_TIMEOUT_SECS, &secs)?;
            if secs == 0 {
                return Err(TidbitsError::InvalidConfig {
                    message: format!("{ENV_REQUEST_TIMEOUT_SECS} must be at least 1"),
                });
            }
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = agent;
        }

        Ok(config)
    }

    /// Set the delay between polls
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Bound the number of requests per chain. Zero is rejected.
    pub fn with_max_attempts(mut self, attempts: u32) -> Result<Self> {
        if attempts == 0 {
            return Err(TidbitsError::InvalidConfig {
                message: "max attempts must be at least 1".to_string(),
            });
        }
        self.max_attempts = Some(attempts);
        Ok(self)
    }

    /// Remove any attempt cap
    pub fn unbounded(mut self) -> Self {
        self.max_attempts = None;
        self
    }

    /// Give up on any single request after `timeout`
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Let requests wait indefinitely
    pub fn without_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| TidbitsError::InvalidConfig {
            message: format!("{name}='{raw}' is not a non-negative integer"),
        })
}
