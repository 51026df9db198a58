//! Client configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::decoder::{ApiErrorDecoder, ErrorDecoder};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// Retry policy for transient transport failures (connect errors, timeouts).
///
/// HTTP error responses are retried only when they carry `Retry-After` and
/// did not decode into a server error; the requested delay is capped at
/// `max_interval`. Both kinds of retry share `max_attempts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. `1` disables retry.
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_interval: DEFAULT_RETRY_INTERVAL,
            max_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retrying after the given failed attempt (1-based).
    ///
    /// Grows by 1.5x per attempt, capped at `max_interval`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let mut interval = self.initial_interval;
        for _ in 1..attempt {
            interval = interval
                .checked_mul(3)
                .map_or(self.max_interval, |d| d / 2);
            if interval >= self.max_interval {
                break;
            }
        }
        interval.min(self.max_interval)
    }
}

/// Configuration for [`Client`](crate::Client).
///
/// ```
/// use std::time::Duration;
///
/// let config = centrifugo_api::Config::new("api-key")
///     .with_base_url("https://centrifugo.example.com/api")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url, "https://centrifugo.example.com/api");
/// ```
#[derive(Clone)]
pub struct Config {
    /// Sent as `X-API-Key`; a blank key sends no header.
    pub api_key: String,
    /// API endpoint root, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Extra headers added to every request.
    pub headers: Vec<(String, String)>,
    pub error_decoder: Arc<dyn ErrorDecoder>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            headers: Vec::new(),
            error_decoder: Arc::new(ApiErrorDecoder),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_error_decoder(mut self, decoder: impl ErrorDecoder + 'static) -> Self {
        self.error_decoder = Arc::new(decoder);
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("headers", &self.headers.len())
            .finish_non_exhaustive()
    }
}
