//! `pearl-http` is an async HTTP client for the Pearl AI expert-chat API.
//!
//! The crate wraps the chat and webhook endpoints with ergonomic methods:
//! - [`Chat::send_completion`]
//! - [`Webhooks::register`] / [`Webhooks::update`]
//! - [`Webhooks::is_valid_signature`] / [`Webhooks::compute_signature`]
//!
//! Requests run through a retry loop with exponential backoff and
//! jitter. Only HTTP 422 responses are retried: that status is how the
//! service signals its one transient validation failure mode, and the
//! policy is deliberately no wider.

mod chat;
mod client;
mod decode;
mod error;
mod options;
mod retry;
mod signature;
mod types;
mod webhooks;
mod wire;

pub use chat::Chat;
pub use client::{PearlClient, DEFAULT_BASE_URL};
pub use error::PearlError;
pub use options::{ClientConfig, RequestOptions};
pub use retry::{RetryPolicy, RetryPolicyConfig};
pub use signature::{compute_signature, verify_signature};
pub use types::{
    ChatCompletionResponse, ChatMessage, Choice, CompletionRequest, ConversationMode, ExpertInfo,
    ProblemDetails, ProblemDetailsResponse, ResponseMessage, Role, WebhookEndpointRequest,
    WebhookPayload, DEFAULT_MODEL,
};
pub use webhooks::Webhooks;

pub type Result<T> = std::result::Result<T, PearlError>;
