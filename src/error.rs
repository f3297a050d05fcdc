use std::time::Duration;
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a completion from being produced.
///
/// An empty `choices` list is not here: it is a successful call and is
/// reported as [`crate::pipeline::Outcome::NoChoices`].
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Endpoint rejected request with status {status}")]
    Rejected { status: StatusCode, body: String },

    #[error("Failed to decode response: {source}")]
    Decode { source: serde_json::Error, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error)
}

impl CompletionError {

    /// Raw response body, for errors that happened after the endpoint answered.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            CompletionError::Rejected { body, .. } | CompletionError::Decode { body, .. } => Some(body),
            _ => None
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CompletionError::Config(_) | CompletionError::EmptyPrompt => 2,
            _ => 1
        }
    }

}
