use crate::models::errors::ClientError;
use crate::models::volumes::parse_volumes;
use crate::utils::config::ClientConfig;
use async_trait::async_trait;
use recommender_core::{BookRecord, FetchError, Fetcher};
use reqwest::Client;
use tracing::{error, info};

/// Largest page the volumes endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 40;

pub struct GoogleBooksFetcher {
    client: Client,
    config: ClientConfig,
}

impl GoogleBooksFetcher {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn fetch_volumes(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<BookRecord>, ClientError> {
        let max_results = max_results.clamp(1, MAX_PAGE_SIZE).to_string();
        let mut params = vec![("q", query), ("maxResults", max_results.as_str())];
        if let Some(key) = self.config.api_key.as_deref() {
            params.push(("key", key));
        }

        info!("Searching Google Books for \"{}\"", query);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            error!("Google Books responded with status: {}", response.status());
            return Err(ClientError::Status(response.status()));
        }

        let body = response.text().await?;
        let records = parse_volumes(&body)?;

        info!("Received {} books for \"{}\"", records.len(), query);
        Ok(records)
    }
}

#[async_trait]
impl Fetcher for GoogleBooksFetcher {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<BookRecord>, FetchError> {
        self.fetch_volumes(query, max_results)
            .await
            .map_err(FetchError::from)
    }
}
