use crate::models::book::BookRecord;
use crate::models::state::GroupMode;
use crate::services::composite::{BookGroup, ResultNode};
use crate::utils::text::first_letter_key;
use std::collections::BTreeMap;

pub const UNKNOWN_YEAR: &str = "Unknown";
pub const NO_RATING: &str = "No Rating";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Bucket key for `record` under `mode`. `None` means ungrouped.
pub fn group_key(mode: GroupMode, record: &BookRecord) -> Option<String> {
    let key = match mode {
        GroupMode::None => return None,
        GroupMode::ByYear => record.published_year().unwrap_or(UNKNOWN_YEAR).to_string(),
        GroupMode::ByRating => record
            .rating
            .map(|rating| rating.to_string())
            .unwrap_or_else(|| NO_RATING.to_string()),
        GroupMode::ByFirstLetter => first_letter_key(&record.title),
        GroupMode::ByAuthor => record.first_author().unwrap_or(UNKNOWN_AUTHOR).to_string(),
    };
    Some(key)
}

/// Top-level nodes for a result set.
///
/// Without grouping every record is a leaf in fetch order. Otherwise one
/// group per key, ordered by key, members kept in fetch order.
pub fn build_tree(mode: GroupMode, records: Vec<BookRecord>) -> Vec<ResultNode> {
    let mut grouped: BTreeMap<String, BookGroup> = BTreeMap::new();
    let mut ungrouped = Vec::new();

    for record in records {
        match group_key(mode, &record) {
            Some(key) => grouped
                .entry(key)
                .or_insert_with_key(|key| BookGroup::new(key.clone()))
                .add(record.into()),
            None => ungrouped.push(ResultNode::Leaf(record)),
        }
    }

    if mode == GroupMode::None {
        ungrouped
    } else {
        grouped.into_values().map(ResultNode::Group).collect()
    }
}
