use std::time::Duration;

use crate::retry::RetryPolicyConfig;

/// Configures credentials, endpoint, timeout and retry behavior for
/// [`PearlClient`](crate::PearlClient).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent as the bearer credential. Required, must be non-empty.
    pub api_key: String,
    /// Base URL override. Defaults to the public Pearl endpoint.
    pub base_url: Option<String>,
    /// Per-attempt request timeout. Defaults to 30 seconds; must be non-zero.
    pub timeout: Option<Duration>,
    /// Retry policy overrides. Unset fields use the policy defaults.
    pub retry_policy: Option<RetryPolicyConfig>,
}

impl ClientConfig {
    /// Builds a configuration with the given API key and defaults for
    /// everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Overrides the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the retry policy configuration.
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicyConfig) -> Self {
        self.retry_policy = Some(retry_policy);
        self
    }
}

/// Per-request transport overrides, merged into a single call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra headers appended to the request.
    pub headers: Vec<(String, String)>,
    /// Overrides the client timeout for this request only.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Overrides the timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
