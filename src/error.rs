use crate::types::{ProblemDetails, ProblemDetailsResponse};

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum PearlError {
    /// Invalid configuration or call parameters, rejected before any
    /// request is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Response decoding error.
    #[error("decode error: {0}")]
    Decode(String),
}

impl PearlError {
    /// Typed view of the API error body.
    ///
    /// Returns `Some` for [`PearlError::Http`] values whose body matches
    /// the Pearl problem-details shape, `None` otherwise.
    pub fn problem_details(&self) -> Option<ProblemDetails> {
        match self {
            Self::Http { body, .. } => serde_json::from_str::<ProblemDetailsResponse>(body)
                .ok()
                .map(|response| response.error),
            _ => None,
        }
    }
}
