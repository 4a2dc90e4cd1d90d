use books_client::{ClientConfig, GoogleBooksFetcher};
use recommender_core::SearchConfig;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

mod commands;
mod console;
mod view;

use console::Console;

const DEFAULT_LOG_FILTER: &str = "recommender_console=info,recommender_core=info,books_client=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client_config = ClientConfig::from_env();
    let search_config = SearchConfig::from_env();
    info!(
        "Using {} with up to {} results per search",
        client_config.base_url, search_config.max_results
    );

    let fetcher = GoogleBooksFetcher::new(client_config)?;
    let mut console = Console::new(Arc::new(fetcher), search_config, std::io::stdout());

    console.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}
