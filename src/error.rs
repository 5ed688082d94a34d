use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the quest platform for one account.
///
/// None of these are fatal for a pass: the runner marks the account as
/// failed and moves on to the next one.
#[derive(Error, Debug)]
pub enum QuestError {
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("Login response did not contain a token")]
    MissingToken,

    #[error("No bearer token for this session")]
    NotAuthenticated,

    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl QuestError {
    /// Short reason suitable for the one-line box output.
    pub fn short_message(&self) -> String {
        match self {
            QuestError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type QuestResult<T> = std::result::Result<T, QuestError>;
