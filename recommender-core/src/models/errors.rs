use thiserror::Error;

/// Failure reported by a [`Fetcher`](crate::models::fetcher::Fetcher).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("view error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum ListenerError {
    #[error("listener disconnected")]
    Disconnected,
    #[error("listener failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search failed: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown grouping mode: {0}")]
pub struct ParseGroupModeError(pub String);
