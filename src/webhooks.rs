use reqwest::Method;

use crate::{
    client::PearlClient,
    options::RequestOptions,
    signature,
    types::WebhookEndpointRequest,
    wire, PearlError, Result,
};

/// Webhook endpoint management and signature checks, obtained from
/// [`PearlClient::webhooks`](crate::PearlClient::webhooks).
#[derive(Clone, Debug)]
pub struct Webhooks<'a> {
    client: &'a PearlClient,
    secret: String,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(client: &'a PearlClient, secret: String) -> Self {
        Self { client, secret }
    }

    /// Registers a webhook endpoint (`POST /webhook`).
    ///
    /// Fails with [`PearlError::Http`] on a non-2xx response. The success
    /// body is empty and is not parsed.
    pub async fn register(
        &self,
        request: &WebhookEndpointRequest,
        options: Option<&RequestOptions>,
    ) -> Result<()> {
        self.send(Method::POST, request, options).await
    }

    /// Updates the registered webhook endpoint (`PUT /webhook`).
    pub async fn update(
        &self,
        request: &WebhookEndpointRequest,
        options: Option<&RequestOptions>,
    ) -> Result<()> {
        self.send(Method::PUT, request, options).await
    }

    async fn send(
        &self,
        method: Method,
        request: &WebhookEndpointRequest,
        options: Option<&RequestOptions>,
    ) -> Result<()> {
        let body = wire::WebhookEndpointBody {
            endpoint: &request.endpoint,
        };
        let (status, body) = self
            .client
            .send_with_retry(method, "/webhook", &body, options)
            .await?;
        if !status.is_success() {
            return Err(PearlError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Checks an inbound delivery's `X-Pearl-API-Signature` header value
    /// against the raw request body.
    ///
    /// `Ok(false)` means tampered, garbage, or mis-keyed input; only
    /// empty arguments are an error.
    pub fn is_valid_signature(&self, received_signature: &str, payload: &str) -> Result<bool> {
        signature::verify_signature(received_signature, payload, &self.secret)
    }

    /// Computes the signature the service would attach to `payload`.
    ///
    /// Useful for exercising a webhook receiver against known payloads.
    pub fn compute_signature(&self, payload: &str) -> Result<String> {
        signature::compute_signature(&self.secret, payload)
    }
}
