use crate::models::book::BookRecord;
use crate::models::errors::FetchError;
use async_trait::async_trait;

/// Source of search results.
///
/// Implementations own the wire protocol. Missing fields are surfaced as
/// absent values or the `N/A` placeholder, never as errors.
#[async_trait]
pub trait Fetcher {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<BookRecord>, FetchError>;
}
