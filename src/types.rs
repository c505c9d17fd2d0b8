use std::fmt;

use serde::{Deserialize, Serialize};

/// Default model for completion requests.
pub const DEFAULT_MODEL: &str = "pearl-ai";

/// Conversation mode for a completion request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConversationMode {
    /// AI-only responses.
    #[default]
    PearlAi,
    /// AI responses with expert verification.
    PearlAiVerified,
    /// AI responses with transition to a human expert.
    PearlAiExpert,
    /// Direct expert connection.
    Expert,
}

impl ConversationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PearlAi => "pearl-ai",
            Self::PearlAiVerified => "pearl-ai-verified",
            Self::PearlAiExpert => "pearl-ai-expert",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
    Assistant,
}

/// Single message in a conversation. Sequence order is significant and
/// preserved as given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Parameters for [`Chat::send_completion`](crate::Chat::send_completion).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Conversation history, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Identifier of the chat session.
    pub session_id: String,
    /// Conversation mode. Defaults to [`ConversationMode::PearlAi`].
    pub mode: ConversationMode,
    /// Model name. Defaults to [`DEFAULT_MODEL`].
    pub model: String,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>, session_id: impl Into<String>) -> Self {
        Self {
            messages,
            session_id: session_id.into(),
            mode: ConversationMode::default(),
            model: DEFAULT_MODEL.to_owned(),
        }
    }

    pub fn with_mode(mut self, mode: ConversationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Expert details attached to a response message or webhook payload.
/// Every field is optional; the service omits what it does not know.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ExpertInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "jobDescription")]
    pub job_description: Option<String>,
    #[serde(default, alias = "avatarUrl")]
    pub avatar_url: Option<String>,
}

/// Message produced by the service in a completion choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseMessage {
    /// Whether a human expert authored the message.
    pub is_human: bool,
    /// Present when a human expert is involved.
    pub expert_info: Option<ExpertInfo>,
    pub role: String,
    pub content: Option<String>,
}

/// Single generated response in a completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub index: i64,
    pub message: ResponseMessage,
    pub finish_reason: String,
}

/// Parsed completion response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatCompletionResponse {
    pub id: String,
    /// Creation time, seconds since the Unix epoch.
    pub created: u64,
    /// Choices in the order the service returned them.
    pub choices: Vec<Choice>,
    pub question_id: Option<String>,
    pub user_id: Option<String>,
}

/// Body for registering or updating a webhook endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebhookEndpointRequest {
    /// Publicly reachable URL the service will deliver to.
    pub endpoint: String,
}

impl WebhookEndpointRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

/// Inbound webhook delivery body, for hosts that verified the signature
/// and want a typed view. Accepts both camelCase and snake_case keys.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WebhookPayload {
    pub id: String,
    #[serde(alias = "sessionId")]
    pub session_id: String,
    pub message: String,
    #[serde(alias = "messageDateTime")]
    pub message_date_time: String,
    #[serde(default)]
    pub expert: ExpertInfo,
}

/// Error detail object inside an API error body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProblemDetails {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
}

/// Full API error body, wrapping [`ProblemDetails`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProblemDetailsResponse {
    pub error: ProblemDetails,
}
