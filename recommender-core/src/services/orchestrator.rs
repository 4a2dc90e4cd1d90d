use crate::models::book::BookRecord;
use crate::models::errors::{FetchError, SearchError};
use crate::models::fetcher::Fetcher;
use crate::models::state::SearchState;
use crate::models::view::View;
use crate::services::composite::ResultNode;
use crate::services::grouping::build_tree;
use crate::services::history::SearchHistory;
use crate::services::notifier::{Notifier, SharedListener};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info};

pub type SharedFetcher = Arc<dyn Fetcher + Send + Sync>;

pub const DEFAULT_MAX_RESULTS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchConfig {
    /// Reads `MAX_RESULTS`, falling back to the default when unset or invalid.
    pub fn from_env() -> Self {
        let max_results = std::env::var("MAX_RESULTS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(DEFAULT_MAX_RESULTS);
        Self { max_results }
    }
}

/// A dispatched search, tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub seq: u64,
    pub state: SearchState,
}

#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: SearchTicket,
    pub result: Result<Vec<BookRecord>, FetchError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    NothingToUndo,
    NothingToRedo,
    /// The query was empty: the view has been cleared and nothing is fetched.
    Cleared(SearchState),
    Fetch(SearchTicket),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub records: usize,
    pub groups: usize,
    pub failed_records: usize,
    pub failed_notifications: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NothingToUndo,
    NothingToRedo,
    Cleared,
    Rendered(RenderSummary),
    /// A newer search was dispatched before this one completed.
    Superseded,
}

/// Drives fetch, notification, grouping and rendering for one view.
///
/// Only the most recently dispatched ticket is ever rendered; completions
/// for older tickets are dropped.
pub struct SearchOrchestrator<V: View> {
    fetcher: SharedFetcher,
    view: V,
    notifier: Notifier,
    history: SearchHistory,
    config: SearchConfig,
    latest_seq: u64,
}

impl<V: View> SearchOrchestrator<V> {
    pub fn new(fetcher: SharedFetcher, view: V, config: SearchConfig) -> Self {
        Self {
            fetcher,
            view,
            notifier: Notifier::new(),
            history: SearchHistory::new(),
            config,
            latest_seq: 0,
        }
    }

    pub fn subscribe(&mut self, listener: SharedListener) {
        self.notifier.subscribe(listener);
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn fetcher(&self) -> SharedFetcher {
        Arc::clone(&self.fetcher)
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Record `state` as the new current search and dispatch it.
    pub fn begin_search(&mut self, state: SearchState) -> Dispatch {
        self.history.save(state.clone());
        self.dispatch(state)
    }

    pub fn begin_undo(&mut self) -> Dispatch {
        match self.history.undo() {
            Some(state) => {
                info!("Undo to {}", state);
                self.dispatch(state)
            }
            None => Dispatch::NothingToUndo,
        }
    }

    pub fn begin_redo(&mut self) -> Dispatch {
        match self.history.redo() {
            Some(state) => {
                info!("Redo to {}", state);
                self.dispatch(state)
            }
            None => Dispatch::NothingToRedo,
        }
    }

    fn dispatch(&mut self, state: SearchState) -> Dispatch {
        self.latest_seq += 1;
        self.view.clear();

        if !state.has_query() {
            debug!("Empty query, nothing to fetch");
            return Dispatch::Cleared(state);
        }

        Dispatch::Fetch(SearchTicket {
            seq: self.latest_seq,
            state,
        })
    }

    /// Fetch for `ticket` without borrowing the orchestrator, so it can be
    /// spawned on a worker task.
    pub fn fetch_task(
        &self,
        ticket: SearchTicket,
    ) -> impl Future<Output = FetchCompletion> + Send + 'static {
        let fetcher = Arc::clone(&self.fetcher);
        let max_results = self.config.max_results;
        async move {
            let result = fetcher
                .search(ticket.state.trimmed_query(), max_results)
                .await;
            FetchCompletion { ticket, result }
        }
    }

    pub fn is_latest(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Consume a fetch result on the coordinating thread.
    pub fn complete(&mut self, completion: FetchCompletion) -> Result<Outcome, SearchError> {
        let FetchCompletion { ticket, result } = completion;

        if !self.is_latest(&ticket) {
            debug!(
                "Dropping stale results for \"{}\" (seq {}, latest {})",
                ticket.state.query, ticket.seq, self.latest_seq
            );
            return Ok(Outcome::Superseded);
        }

        let records = result.map_err(|e| {
            error!("Error fetching data for \"{}\": {}", ticket.state.query, e);
            SearchError::from(e)
        })?;

        let mut summary = RenderSummary {
            records: records.len(),
            ..RenderSummary::default()
        };

        for record in &records {
            summary.failed_notifications += self.notifier.notify(&record.title).failed;
        }

        let flags = ticket.state.flags();
        let tree = build_tree(ticket.state.group_mode, records);
        for node in &tree {
            if let ResultNode::Group(_) = node {
                summary.groups += 1;
            }
            summary.failed_records += node.render(&mut self.view, flags);
        }

        info!(
            "Rendered {} books in {} groups for \"{}\"",
            summary.records, summary.groups, ticket.state.query
        );
        Ok(Outcome::Rendered(summary))
    }

    /// Fetch inline and complete. Used when no worker dispatch is needed.
    pub async fn run(&mut self, dispatch: Dispatch) -> Result<Outcome, SearchError> {
        match dispatch {
            Dispatch::NothingToUndo => Ok(Outcome::NothingToUndo),
            Dispatch::NothingToRedo => Ok(Outcome::NothingToRedo),
            Dispatch::Cleared(_) => Ok(Outcome::Cleared),
            Dispatch::Fetch(ticket) => {
                let completion = self.fetch_task(ticket).await;
                self.complete(completion)
            }
        }
    }

    pub async fn search(&mut self, state: SearchState) -> Result<Outcome, SearchError> {
        let dispatch = self.begin_search(state);
        self.run(dispatch).await
    }

    pub async fn undo(&mut self) -> Result<Outcome, SearchError> {
        let dispatch = self.begin_undo();
        self.run(dispatch).await
    }

    pub async fn redo(&mut self) -> Result<Outcome, SearchError> {
        let dispatch = self.begin_redo();
        self.run(dispatch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ListenerError;
    use crate::models::state::GroupMode;
    use crate::models::view::{RecordingView, RenderInstruction};
    use crate::services::notifier::{KeywordWatcher, Listener};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FixtureFetcher {
        responses: HashMap<String, Result<Vec<BookRecord>, FetchError>>,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl FixtureFetcher {
        fn with(mut self, query: &str, response: Result<Vec<BookRecord>, FetchError>) -> Self {
            self.responses.insert(query.to_string(), response);
            self
        }
    }

    #[async_trait]
    impl Fetcher for FixtureFetcher {
        async fn search(
            &self,
            query: &str,
            max_results: u32,
        ) -> Result<Vec<BookRecord>, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), max_results));
            self.responses
                .get(query)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn python_books() -> Vec<BookRecord> {
        vec![
            BookRecord::new("Learning Python")
                .with_published_date("2013-06-12")
                .with_rating(4.0)
                .with_authors(["Mark Lutz"]),
            BookRecord::new("Fluent Python")
                .with_published_date("2015-07-30")
                .with_authors(["Luciano Ramalho"]),
            BookRecord::new("Python Cookbook").with_published_date("2013-05-10"),
        ]
    }

    fn rust_books() -> Vec<BookRecord> {
        vec![BookRecord::new("The Rust Programming Language").with_published_date("2019-08-12")]
    }

    fn orchestrator(fetcher: FixtureFetcher) -> SearchOrchestrator<RecordingView> {
        SearchOrchestrator::new(
            Arc::new(fetcher),
            RecordingView::new(),
            SearchConfig::default(),
        )
    }

    #[tokio::test]
    async fn ungrouped_search_renders_in_fetch_order() {
        let mut search = orchestrator(FixtureFetcher::default().with("python", Ok(python_books())));

        let outcome = search
            .search(SearchState::new("python", GroupMode::None))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Rendered(RenderSummary {
                records: 3,
                groups: 0,
                failed_records: 0,
                failed_notifications: 0,
            })
        );
        assert_eq!(search.view().instructions()[0], RenderInstruction::Clear);
        assert!(search.view().headings().is_empty());
        assert_eq!(
            search.view().titles(),
            vec!["Learning Python", "Fluent Python", "Python Cookbook"]
        );
    }

    #[tokio::test]
    async fn grouped_search_renders_sorted_groups_with_state_flags() {
        let mut search = orchestrator(FixtureFetcher::default().with("python", Ok(python_books())));
        let state = SearchState {
            query: "python".to_string(),
            group_mode: GroupMode::ByYear,
            show_date: true,
            show_rating: false,
        };

        search.search(state.clone()).await.unwrap();

        assert_eq!(search.view().headings(), vec!["2013", "2015"]);
        assert_eq!(
            search.view().titles(),
            vec!["Learning Python", "Python Cookbook", "Fluent Python"]
        );
        let flags_seen: Vec<_> = search
            .view()
            .current()
            .iter()
            .filter_map(|instruction| match instruction {
                RenderInstruction::Record(_, flags) => Some(*flags),
                _ => None,
            })
            .collect();
        assert!(flags_seen.iter().all(|flags| *flags == state.flags()));
    }

    #[tokio::test]
    async fn query_is_trimmed_and_max_results_forwarded() {
        let fetcher = Arc::new(FixtureFetcher::default().with("python", Ok(python_books())));
        let mut search = SearchOrchestrator::new(
            Arc::clone(&fetcher) as SharedFetcher,
            RecordingView::new(),
            SearchConfig { max_results: 5 },
        );

        search
            .search(SearchState::new("  python ", GroupMode::None))
            .await
            .unwrap();

        assert_eq!(
            *fetcher.calls.lock().unwrap(),
            vec![("python".to_string(), 5)]
        );
    }

    #[tokio::test]
    async fn empty_query_clears_view_without_fetching() {
        let fetcher = Arc::new(FixtureFetcher::default());
        let mut search = SearchOrchestrator::new(
            Arc::clone(&fetcher) as SharedFetcher,
            RecordingView::new(),
            SearchConfig::default(),
        );

        let outcome = search.search(SearchState::default()).await.unwrap();

        assert_eq!(outcome, Outcome::Cleared);
        assert_eq!(search.view().instructions(), &[RenderInstruction::Clear]);
        assert!(fetcher.calls.lock().unwrap().is_empty());
        assert_eq!(search.history().past_len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_as_search_failed() {
        let mut search = orchestrator(
            FixtureFetcher::default().with("python", Err(FetchError::Status(503))),
        );

        let err = search
            .search(SearchState::new("python", GroupMode::None))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "search failed: unexpected status: 503");
        assert!(search.view().titles().is_empty());
        assert_eq!(search.history().past_len(), 1);
    }

    #[tokio::test]
    async fn every_title_is_broadcast_to_listeners() {
        let mut search = orchestrator(FixtureFetcher::default().with("python", Ok(python_books())));
        let (watcher, mut matches) = KeywordWatcher::new();
        watcher.add_keyword("COOKBOOK");
        watcher.add_keyword("python");
        search.subscribe(Arc::new(watcher));

        search
            .search(SearchState::new("python", GroupMode::ByAuthor))
            .await
            .unwrap();

        let mut events = Vec::new();
        while let Ok(event) = matches.try_recv() {
            events.push((event.keyword, event.title));
        }
        assert_eq!(
            events,
            vec![
                ("python".to_string(), "Learning Python".to_string()),
                ("python".to_string(), "Fluent Python".to_string()),
                ("cookbook".to_string(), "Python Cookbook".to_string()),
                ("python".to_string(), "Python Cookbook".to_string()),
            ]
        );
    }

    struct AlwaysFails;

    impl Listener for AlwaysFails {
        fn update(&self, _title: &str) -> Result<(), ListenerError> {
            Err(ListenerError::Failed("unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn listener_failures_do_not_abort_rendering() {
        let mut search = orchestrator(FixtureFetcher::default().with("rust", Ok(rust_books())));
        search.subscribe(Arc::new(AlwaysFails));

        let outcome = search
            .search(SearchState::new("rust", GroupMode::None))
            .await
            .unwrap();

        match outcome {
            Outcome::Rendered(summary) => {
                assert_eq!(summary.failed_notifications, 1);
                assert_eq!(summary.records, 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(search.view().titles(), vec!["The Rust Programming Language"]);
    }

    #[tokio::test]
    async fn undo_and_redo_replay_saved_states() {
        let mut search = orchestrator(
            FixtureFetcher::default()
                .with("python", Ok(python_books()))
                .with("rust", Ok(rust_books())),
        );

        assert_eq!(search.undo().await.unwrap(), Outcome::NothingToUndo);

        search
            .search(SearchState::new("python", GroupMode::None))
            .await
            .unwrap();
        assert_eq!(search.undo().await.unwrap(), Outcome::NothingToUndo);

        search
            .search(SearchState::new("rust", GroupMode::None))
            .await
            .unwrap();
        assert_eq!(search.view().titles(), vec!["The Rust Programming Language"]);

        search.undo().await.unwrap();
        assert_eq!(search.view().titles().len(), 3);
        assert_eq!(search.history().current().map(|s| s.query.as_str()), Some("python"));
        assert_eq!(search.history().past_len(), 1);

        search.redo().await.unwrap();
        assert_eq!(search.view().titles(), vec!["The Rust Programming Language"]);
        assert_eq!(search.redo().await.unwrap(), Outcome::NothingToRedo);
        assert_eq!(search.history().past_len(), 2);
    }

    #[tokio::test]
    async fn stale_completion_is_ignored() {
        let mut search = orchestrator(
            FixtureFetcher::default()
                .with("python", Ok(python_books()))
                .with("rust", Ok(rust_books())),
        );

        let Dispatch::Fetch(first) = search.begin_search(SearchState::new("python", GroupMode::None))
        else {
            panic!("expected a fetch");
        };
        let Dispatch::Fetch(second) = search.begin_search(SearchState::new("rust", GroupMode::None))
        else {
            panic!("expected a fetch");
        };
        assert!(second.seq > first.seq);

        let late = search.fetch_task(first);
        let fresh = search.fetch_task(second);
        let fresh = tokio::spawn(fresh).await.unwrap();
        let late = tokio::spawn(late).await.unwrap();

        assert!(matches!(search.complete(fresh).unwrap(), Outcome::Rendered(_)));
        assert_eq!(search.complete(late).unwrap(), Outcome::Superseded);
        assert_eq!(search.view().titles(), vec!["The Rust Programming Language"]);
    }

    #[tokio::test]
    async fn stale_failure_is_not_reported() {
        let mut search = orchestrator(
            FixtureFetcher::default().with("broken", Err(FetchError::Transport("reset".to_string()))),
        );

        let Dispatch::Fetch(stale) = search.begin_search(SearchState::new("broken", GroupMode::None))
        else {
            panic!("expected a fetch");
        };
        search.begin_search(SearchState::default());

        let completion = search.fetch_task(stale).await;
        assert_eq!(search.complete(completion).unwrap(), Outcome::Superseded);
    }
}
