use serde::{Deserialize, Serialize};

/// Placeholder the fetcher uses for a missing title or date.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub authors: Vec<String>,
}

impl BookRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            poster_url: None,
            published_date: None,
            rating: None,
            authors: Vec::new(),
        }
    }

    pub fn with_poster_url(mut self, url: impl Into<String>) -> Self {
        self.poster_url = Some(url.into());
        self
    }

    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.published_date = Some(date.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Year part of the published date ("2020-05-01" -> "2020").
    ///
    /// `None` only when the date is absent or the `N/A` placeholder; any
    /// other value yields whatever precedes its first `-`, untrimmed.
    pub fn published_year(&self) -> Option<&str> {
        let date = self.published_date.as_deref()?;
        if date == NOT_AVAILABLE {
            return None;
        }
        date.split('-').next()
    }

    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    pub fn date_label(&self) -> &str {
        self.published_date.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn rating_label(&self) -> String {
        self.rating
            .map(|rating| rating.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}
