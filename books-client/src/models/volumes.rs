use crate::models::errors::ClientError;
use recommender_core::models::book::NOT_AVAILABLE;
use recommender_core::BookRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub published_date: Option<String>,
    pub average_rating: Option<f64>,
    pub image_links: Option<ImageLinks>,
    #[serde(default)]
    pub authors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

impl From<VolumeInfo> for BookRecord {
    fn from(info: VolumeInfo) -> Self {
        BookRecord {
            title: info.title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            poster_url: info
                .image_links
                .and_then(|links| links.thumbnail)
                .filter(|url| !url.trim().is_empty()),
            published_date: info.published_date,
            rating: info.average_rating,
            authors: info.authors,
        }
    }
}

/// Decode a volumes search body into records, in response order.
pub fn parse_volumes(body: &str) -> Result<Vec<BookRecord>, ClientError> {
    let response: VolumesResponse = serde_json::from_str(body)?;
    Ok(response
        .items
        .into_iter()
        .map(|item| BookRecord::from(item.volume_info))
        .collect())
}
