use crate::models::errors::ListenerError;
use crate::utils::text::normalize_keyword;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

/// Anything that wants to hear about book titles as they show up.
pub trait Listener {
    fn update(&self, title: &str) -> Result<(), ListenerError>;
}

pub type SharedListener = Arc<dyn Listener + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Broadcasts titles to listeners in subscription order.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<SharedListener>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: SharedListener) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&self, title: &str) -> NotifyReport {
        let mut report = NotifyReport::default();
        for (position, listener) in self.listeners.iter().enumerate() {
            match listener.update(title) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    error!("Listener {} failed on '{}': {}", position, title, e);
                    report.failed += 1;
                }
            }
        }
        report
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub keyword: String,
    pub title: String,
    pub matched_at: DateTime<Utc>,
}

/// Listener raising a [`KeywordMatch`] for each subscribed keyword found in
/// a title.
pub struct KeywordWatcher {
    keywords: Mutex<BTreeSet<String>>,
    matches: UnboundedSender<KeywordMatch>,
}

impl KeywordWatcher {
    pub fn new() -> (Self, UnboundedReceiver<KeywordMatch>) {
        let (tx, rx) = unbounded_channel();
        let watcher = Self {
            keywords: Mutex::new(BTreeSet::new()),
            matches: tx,
        };
        (watcher, rx)
    }

    /// Returns `true` if the keyword was not yet subscribed.
    pub fn add_keyword(&self, word: &str) -> bool {
        match normalize_keyword(word) {
            Some(keyword) => self
                .keywords
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(keyword),
            None => false,
        }
    }

    /// Sorted snapshot of the subscribed keywords.
    pub fn keywords(&self) -> Vec<String> {
        self.keywords
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    fn matching_keywords(&self, title: &str) -> Vec<String> {
        let haystack = title.to_lowercase();
        self.keywords
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|keyword| haystack.contains(keyword.as_str()))
            .cloned()
            .collect()
    }
}

impl Listener for KeywordWatcher {
    fn update(&self, title: &str) -> Result<(), ListenerError> {
        for keyword in self.matching_keywords(title) {
            info!("📢 Found book with '{}': {}", keyword, title);
            let event = KeywordMatch {
                keyword,
                title: title.to_string(),
                matched_at: Utc::now(),
            };
            self.matches
                .send(event)
                .map_err(|_| ListenerError::Disconnected)?;
        }
        Ok(())
    }
}
