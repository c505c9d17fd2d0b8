use serde::Serialize;

use crate::types::ChatMessage;

#[derive(Debug, Serialize)]
pub(crate) struct CompletionRequestBody<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub metadata: Metadata<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Metadata<'a> {
    pub mode: &'a str,
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct WebhookEndpointBody<'a> {
    pub endpoint: &'a str,
}
