use reqwest::Method;

use crate::{
    client::PearlClient,
    decode::decode_completion_response,
    options::RequestOptions,
    types::{ChatCompletionResponse, CompletionRequest},
    wire, PearlError, Result,
};

/// Chat completion operations, obtained from
/// [`PearlClient::chat`](crate::PearlClient::chat).
#[derive(Clone, Copy, Debug)]
pub struct Chat<'a> {
    client: &'a PearlClient,
}

impl<'a> Chat<'a> {
    pub(crate) fn new(client: &'a PearlClient) -> Self {
        Self { client }
    }

    /// Sends a completion request to `/chat/completions`.
    ///
    /// `options` carries per-request transport overrides (extra headers,
    /// timeout). Non-2xx responses fail with [`PearlError::Http`]
    /// carrying the status and raw body.
    pub async fn send_completion(
        &self,
        request: CompletionRequest,
        options: Option<&RequestOptions>,
    ) -> Result<ChatCompletionResponse> {
        let body = wire::CompletionRequestBody {
            model: &request.model,
            messages: &request.messages,
            metadata: wire::Metadata {
                mode: request.mode.as_str(),
                session_id: &request.session_id,
            },
        };

        let (status, body) = self
            .client
            .send_with_retry(Method::POST, "/chat/completions", &body, options)
            .await?;
        if !status.is_success() {
            return Err(PearlError::Http {
                status: status.as_u16(),
                body,
            });
        }

        decode_completion_response(&body)
    }
}
