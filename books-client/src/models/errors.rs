use recommender_core::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Google Books responded with status: {0}")]
    Status(reqwest::StatusCode),
    #[error("Deserialization error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => FetchError::Transport(e.to_string()),
            ClientError::Status(status) => FetchError::Status(status.as_u16()),
            ClientError::Decode(e) => FetchError::Decode(e.to_string()),
        }
    }
}
