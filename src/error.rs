use thiserror::Error;

use crate::types::ErrorPayload;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("invalid category '{0}'")]
    InvalidCategory(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("validation error: {0}")]
    Validation(String),

    // Transport and server errors
    #[error("network error: {0}")]
    Network(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("ticket rejected: {0}")]
    Rejected(ErrorPayload),

    #[error("ticket {0} not found")]
    TicketNotFound(u64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeskError>;

impl From<reqwest::Error> for DeskError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => DeskError::Server {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => DeskError::Decode(err.to_string()),
            None => DeskError::Network(err.to_string()),
        }
    }
}
