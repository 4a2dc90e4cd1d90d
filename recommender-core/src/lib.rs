//! Search, grouping, keyword alerts and undo/redo history for a book
//! recommender, independent of any UI toolkit or HTTP client.

pub mod models;
pub mod services;
pub mod utils;

pub use models::book::BookRecord;
pub use models::errors::{FetchError, ListenerError, ParseGroupModeError, SearchError, ViewError};
pub use models::fetcher::Fetcher;
pub use models::state::{DisplayFlags, GroupMode, SearchState};
pub use models::view::{RecordingView, RenderInstruction, View};
pub use services::composite::{BookGroup, ResultNode};
pub use services::grouping::{build_tree, group_key};
pub use services::history::SearchHistory;
pub use services::notifier::{KeywordMatch, KeywordWatcher, Listener, Notifier, NotifyReport};
pub use services::orchestrator::{
    Dispatch, FetchCompletion, Outcome, RenderSummary, SearchConfig, SearchOrchestrator,
    SearchTicket, SharedFetcher,
};
