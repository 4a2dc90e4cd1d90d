use crate::commands::{self, Command, HELP};
use crate::view::ConsoleView;
use recommender_core::{
    DisplayFlags, Dispatch, FetchCompletion, KeywordMatch, KeywordWatcher, Outcome,
    SearchConfig, SearchOrchestrator, SearchState, SharedFetcher,
};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

/// Line-driven front end. Owns the orchestrator; fetches run on spawned
/// tasks and are joined back on the loop in [`Console::run`], so all state
/// changes happen there.
pub struct Console<W: Write> {
    orchestrator: SearchOrchestrator<ConsoleView<W>>,
    watcher: Arc<KeywordWatcher>,
    matches: UnboundedReceiver<KeywordMatch>,
    draft: SearchState,
    fetches: JoinSet<FetchCompletion>,
}

impl<W: Write> Console<W> {
    pub fn new(fetcher: SharedFetcher, config: SearchConfig, out: W) -> Self {
        let mut orchestrator = SearchOrchestrator::new(fetcher, ConsoleView::new(out), config);
        let (watcher, matches) = KeywordWatcher::new();
        let watcher = Arc::new(watcher);
        orchestrator.subscribe(watcher.clone());

        Self {
            orchestrator,
            watcher,
            matches,
            draft: SearchState::default(),
            fetches: JoinSet::new(),
        }
    }

    #[cfg(test)]
    pub fn view(&self) -> &ConsoleView<W> {
        self.orchestrator.view()
    }

    #[cfg(test)]
    pub fn draft(&self) -> &SearchState {
        &self.draft
    }

    fn note(&mut self, text: &str) {
        self.orchestrator.view_mut().note(text);
    }

    /// Read commands until `quit`, end of input or a read error, then wait
    /// for any outstanding search before returning.
    ///
    /// Lines that are not valid UTF-8 are skipped.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, mut input: R) -> io::Result<()> {
        // Holds a partial line across cancelled `read_until` calls.
        let mut buf = Vec::new();
        self.note(HELP);

        let result = loop {
            tokio::select! {
                biased;
                read = input.read_until(b'\n', &mut buf) => {
                    match read {
                        Ok(0) if buf.is_empty() => break Ok(()),
                        Ok(_) => {
                            let line = match std::str::from_utf8(&buf) {
                                Ok(line) => line.to_string(),
                                Err(e) => {
                                    warn!("Skipping input line that is not valid UTF-8: {}", e);
                                    self.note("Ignored a line that is not valid UTF-8");
                                    buf.clear();
                                    continue;
                                }
                            };
                            buf.clear();
                            if !self.handle_line(&line) {
                                break Ok(());
                            }
                        }
                        Err(e) => {
                            error!("Failed to read input: {}", e);
                            break Err(e);
                        }
                    }
                }
                Some(joined) = self.fetches.join_next() => {
                    self.handle_joined(joined);
                }
            }
        };

        self.finish_pending().await;
        info!("Console session finished");
        result
    }

    /// Returns `false` when the session should end.
    pub fn handle_line(&mut self, line: &str) -> bool {
        match commands::parse(line) {
            Ok(Some(command)) => self.handle(command),
            Ok(None) => true,
            Err(e) => {
                self.note(&e.to_string());
                true
            }
        }
    }

    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Search(query) => {
                let state = self.draft.with_query(query.trim());
                self.search(state);
            }
            Command::Group(mode) => {
                let state = self.draft.with_group_mode(mode);
                self.search(state);
            }
            Command::Date(show_date) => {
                let state = self.draft.with_flags(DisplayFlags {
                    show_date,
                    show_rating: self.draft.show_rating,
                });
                self.search(state);
            }
            Command::Rating(show_rating) => {
                let state = self.draft.with_flags(DisplayFlags {
                    show_date: self.draft.show_date,
                    show_rating,
                });
                self.search(state);
            }
            Command::Undo => {
                let dispatch = self.orchestrator.begin_undo();
                self.follow(dispatch);
            }
            Command::Redo => {
                let dispatch = self.orchestrator.begin_redo();
                self.follow(dispatch);
            }
            Command::Subscribe(word) => {
                if self.watcher.add_keyword(&word) {
                    info!("Subscribed to keyword '{}'", word.trim().to_lowercase());
                }
                self.list_keywords();
            }
            Command::Keywords => self.list_keywords(),
            Command::History => self.list_history(),
            Command::Help => self.note(HELP),
            Command::Quit => return false,
        }
        true
    }

    fn search(&mut self, state: SearchState) {
        let dispatch = self.orchestrator.begin_search(state);
        self.follow(dispatch);
    }

    fn follow(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::NothingToUndo => self.note("Nothing to undo"),
            Dispatch::NothingToRedo => self.note("Nothing to redo"),
            Dispatch::Cleared(state) => self.draft = state,
            Dispatch::Fetch(ticket) => {
                self.draft = ticket.state.clone();
                self.note(&format!("Searching {} ...", ticket.state));

                let task = self.orchestrator.fetch_task(ticket);
                self.fetches.spawn(task);
            }
        }
    }

    fn handle_joined(&mut self, joined: Result<FetchCompletion, JoinError>) {
        match joined {
            Ok(completion) => self.handle_completion(completion),
            Err(e) => {
                error!("Search task aborted: {}", e);
                self.note("Search aborted");
            }
        }
    }

    pub fn handle_completion(&mut self, completion: FetchCompletion) {
        match self.orchestrator.complete(completion) {
            Ok(Outcome::Rendered(summary)) => {
                let mut text = format!("{} books", summary.records);
                if summary.groups > 0 {
                    text.push_str(&format!(" in {} groups", summary.groups));
                }
                self.note(&text);
            }
            Ok(Outcome::Superseded) => debug!("Ignored results of a superseded search"),
            Ok(_) => {}
            Err(e) => {
                error!("{}", e);
                self.note(&e.to_string());
            }
        }

        self.report_matches();
    }

    /// Wait for every spawned fetch so no completion is lost on exit.
    /// A fetch that panicked counts as finished.
    pub async fn finish_pending(&mut self) {
        while let Some(joined) = self.fetches.join_next().await {
            self.handle_joined(joined);
        }
    }

    fn report_matches(&mut self) {
        while let Ok(found) = self.matches.try_recv() {
            self.note(&format!("📢 Found book with '{}': {}", found.keyword, found.title));
        }
    }

    fn list_keywords(&mut self) {
        let keywords = self.watcher.keywords();
        let listed = if keywords.is_empty() {
            "None".to_string()
        } else {
            keywords.join(", ")
        };
        self.note(&format!("Subscribed keywords: {}", listed));
    }

    fn list_history(&mut self) {
        let history = self.orchestrator.history();
        let current = history.past_len();
        let lines: Vec<String> = history
            .timeline()
            .enumerate()
            .map(|(i, state)| {
                let marker = if i + 1 == current { "*" } else { " " };
                format!("{} {}. {}", marker, i + 1, state)
            })
            .collect();

        if lines.is_empty() {
            self.note("No searches yet");
        }
        for line in lines {
            self.note(&line);
        }
    }
}
