use rand::Rng;

use crate::{PearlError, Result};

/// Overrides for [`RetryPolicy`] construction. Unset fields use the
/// default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryPolicyConfig {
    /// Whether retries happen at all. Default: `true`.
    pub enabled: Option<bool>,
    /// Maximum number of retries after the initial attempt. Default: 30.
    pub max_retries: Option<u32>,
    /// Base delay before the first retry, in milliseconds. Default: 100.
    pub retry_delay_ms: Option<u64>,
    /// Upper bound on the backoff delay, in milliseconds. Default: 30000.
    pub max_retry_delay_ms: Option<u64>,
}

/// Validated retry policy: which responses retry and how long to wait.
///
/// Holds no per-request state; one policy instance is shared read-only
/// across all in-flight requests of a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    enabled: bool,
    max_retries: u32,
    retry_delay_ms: u64,
    max_retry_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 30,
            retry_delay_ms: 100,
            max_retry_delay_ms: 30_000,
        }
    }
}

impl RetryPolicy {
    /// Builds a policy from overrides, substituting defaults for unset
    /// fields.
    ///
    /// Fails with [`PearlError::InvalidArgument`] when a delay is zero or
    /// `retry_delay_ms` exceeds `max_retry_delay_ms`. Invalid values are
    /// rejected, never clamped.
    pub fn new(config: RetryPolicyConfig) -> Result<Self> {
        let defaults = Self::default();
        let policy = Self {
            enabled: config.enabled.unwrap_or(defaults.enabled),
            max_retries: config.max_retries.unwrap_or(defaults.max_retries),
            retry_delay_ms: config.retry_delay_ms.unwrap_or(defaults.retry_delay_ms),
            max_retry_delay_ms: config
                .max_retry_delay_ms
                .unwrap_or(defaults.max_retry_delay_ms),
        };

        if policy.retry_delay_ms == 0 {
            return Err(PearlError::InvalidArgument(
                "retry_delay_ms must be a positive number".to_owned(),
            ));
        }
        if policy.max_retry_delay_ms == 0 {
            return Err(PearlError::InvalidArgument(
                "max_retry_delay_ms must be a positive number".to_owned(),
            ));
        }
        if policy.retry_delay_ms > policy.max_retry_delay_ms {
            return Err(PearlError::InvalidArgument(
                "retry_delay_ms cannot be greater than max_retry_delay_ms".to_owned(),
            ));
        }

        Ok(policy)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }

    pub fn max_retry_delay_ms(&self) -> u64 {
        self.max_retry_delay_ms
    }

    /// Decides whether a request that has already retried `retry_count`
    /// times should be retried, given the response status if one exists.
    ///
    /// Only HTTP 422 retries. Server errors and status-less transport
    /// failures are final: the upstream service signals its transient
    /// validation failure mode with 422 and nothing else.
    pub fn should_retry(&self, retry_count: u32, status_code: Option<u16>) -> bool {
        if !self.enabled {
            return false;
        }
        status_code == Some(422) && retry_count < self.max_retries
    }

    /// Backoff delay in milliseconds before the `retry_count`-th retry
    /// (1-indexed).
    ///
    /// `min(retry_delay_ms * 2^(n-1), max_retry_delay_ms)` plus up to 10%
    /// random jitter, floored to whole milliseconds.
    pub fn calculate_retry_delay(&self, retry_count: u32) -> u64 {
        let exponential = self.retry_delay_ms as f64 * 2f64.powi(retry_count as i32 - 1);
        let capped = exponential.min(self.max_retry_delay_ms as f64);
        let jitter = rand::thread_rng().gen_range(0.0..0.1) * capped;
        (capped + jitter).floor() as u64
    }
}
