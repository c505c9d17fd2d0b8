use std::fmt;
use std::time::Duration;

use reqwest::{header, Method, StatusCode};
use serde::Serialize;
use tokio::time::sleep;

use crate::{
    chat::Chat,
    options::{ClientConfig, RequestOptions},
    retry::RetryPolicy,
    webhooks::Webhooks,
    PearlError, Result,
};

/// Default base URL for the Pearl API.
pub const DEFAULT_BASE_URL: &str = "https://api.pearl.com/api/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Pearl chat and webhook endpoints.
///
/// Cloning is cheap; clones share the underlying connection pool. The
/// client is safe to use from multiple tasks concurrently.
#[derive(Clone)]
pub struct PearlClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl fmt::Debug for PearlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PearlClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

impl PearlClient {
    /// Creates a client from a configuration.
    ///
    /// Fails with [`PearlError::InvalidArgument`] when `api_key` is
    /// empty, `timeout` is zero, or the retry policy overrides are
    /// inconsistent.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(PearlError::InvalidArgument(
                "client configuration must include an api_key".to_owned(),
            ));
        }
        if let Some(timeout) = config.timeout {
            if timeout.is_zero() {
                return Err(PearlError::InvalidArgument(
                    "timeout must be a positive duration".to_owned(),
                ));
            }
        }
        let retry_policy = RetryPolicy::new(config.retry_policy.unwrap_or_default())?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            api_key: config.api_key,
            timeout: config.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry_policy,
        })
    }

    /// Creates a client with an API key and defaults for everything else.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(api_key))
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `PEARL_API_KEY` — API key (required)
    /// - `PEARL_BASE_URL` — base URL override (optional)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("PEARL_API_KEY").map_err(|_| {
            PearlError::InvalidArgument("missing PEARL_API_KEY environment variable".to_owned())
        })?;
        if api_key.trim().is_empty() {
            return Err(PearlError::InvalidArgument(
                "PEARL_API_KEY is set but empty".to_owned(),
            ));
        }

        let mut config = ClientConfig::new(api_key);
        if let Ok(base_url) = std::env::var("PEARL_BASE_URL") {
            if !base_url.trim().is_empty() {
                config = config.with_base_url(base_url);
            }
        }
        Self::new(config)
    }

    /// Chat completion operations.
    pub fn chat(&self) -> Chat<'_> {
        Chat::new(self)
    }

    /// Webhook operations, bound to the client API key as the signing
    /// secret.
    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self, self.api_key.clone())
    }

    /// Webhook operations bound to an explicit signing secret.
    ///
    /// Fails with [`PearlError::InvalidArgument`] when the secret is
    /// empty.
    pub fn webhooks_with_secret(&self, secret: impl Into<String>) -> Result<Webhooks<'_>> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(PearlError::InvalidArgument(
                "webhook secret must be provided".to_owned(),
            ));
        }
        Ok(Webhooks::new(self, secret))
    }

    /// The retry policy in effect.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Sends one logical request, retrying per the configured policy.
    ///
    /// The request is rebuilt for every attempt and runs under its own
    /// timeout. A response the policy declines to retry is returned
    /// as-is with its body, whatever the status; resources decide what a
    /// failure is. A transport-level failure that is not retried
    /// propagates as [`PearlError::Transport`].
    pub(crate) async fn send_with_retry<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> Result<(StatusCode, String)> {
        let url = self.endpoint_url(path);
        let mut retry_count: u32 = 0;

        loop {
            let timeout = options
                .and_then(|options| options.timeout)
                .unwrap_or(self.timeout);
            let mut request = self
                .http
                .request(method.clone(), &url)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
                .header(header::CONTENT_TYPE, "application/json")
                .timeout(timeout)
                .json(body);
            if let Some(options) = options {
                for (name, value) in &options.headers {
                    request = request.header(name.as_str(), value.as_str());
                }
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if self
                        .retry_policy
                        .should_retry(retry_count, Some(status.as_u16()))
                    {
                        retry_count += 1;
                        self.wait_before_retry(retry_count, Some(status.as_u16()))
                            .await;
                        continue;
                    }
                    let body = response.text().await.map_err(PearlError::Transport)?;
                    return Ok((status, body));
                }
                Err(err) => {
                    let status = err.status().map(|status| status.as_u16());
                    if self.retry_policy.should_retry(retry_count, status) {
                        retry_count += 1;
                        self.wait_before_retry(retry_count, status).await;
                        continue;
                    }
                    return Err(PearlError::Transport(err));
                }
            }
        }
    }

    /// Waits before the next retry attempt. Suspends only this logical
    /// request; other in-flight requests are unaffected.
    async fn wait_before_retry(&self, retry_count: u32, status_code: Option<u16>) {
        let delay_ms = self.retry_policy.calculate_retry_delay(retry_count);
        tracing::debug!(retry_count, status_code, delay_ms, "retrying request");
        sleep(Duration::from_millis(delay_ms)).await;
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::PearlClient;
    use crate::{ClientConfig, PearlError};

    #[test]
    fn empty_api_key_is_rejected() {
        let err = PearlClient::new(ClientConfig::default()).expect_err("must fail");
        assert!(matches!(err, PearlError::InvalidArgument(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = ClientConfig::new("key").with_timeout(Duration::ZERO);
        let err = PearlClient::new(config).expect_err("must fail");
        assert!(matches!(err, PearlError::InvalidArgument(_)));
    }

    #[test]
    fn invalid_retry_overrides_fail_client_construction() {
        let config = ClientConfig::new("key").with_retry_policy(crate::RetryPolicyConfig {
            retry_delay_ms: Some(1_000),
            max_retry_delay_ms: Some(10),
            ..Default::default()
        });
        let err = PearlClient::new(config).expect_err("must fail");
        assert!(matches!(err, PearlError::InvalidArgument(_)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = PearlClient::with_api_key("secret-key").expect("must build");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn endpoint_url_joins_path_segments() {
        let client = PearlClient::new(
            ClientConfig::new("key").with_base_url("https://api.pearl.com/api/v1/"),
        )
        .expect("must build");

        assert_eq!(
            client.endpoint_url("/chat/completions"),
            "https://api.pearl.com/api/v1/chat/completions"
        );
        assert_eq!(
            client.endpoint_url("webhook"),
            "https://api.pearl.com/api/v1/webhook"
        );
    }

    #[test]
    fn empty_webhook_secret_is_rejected() {
        let client = PearlClient::with_api_key("key").expect("must build");
        let err = client.webhooks_with_secret("").expect_err("must fail");
        assert!(matches!(err, PearlError::InvalidArgument(_)));
    }
}
