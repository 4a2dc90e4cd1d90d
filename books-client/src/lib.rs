//! [`Fetcher`](recommender_core::Fetcher) backed by the Google Books
//! volumes API.

pub mod models;
pub mod services;
pub mod utils;

pub use models::errors::ClientError;
pub use models::volumes::{parse_volumes, VolumesResponse};
pub use services::google_books::GoogleBooksFetcher;
pub use utils::config::ClientConfig;
