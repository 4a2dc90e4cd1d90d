use crate::models::state::SearchState;

/// Linear undo/redo history of search snapshots.
///
/// The last entry of `past` is the current state. `undo` needs a previous
/// state to return to, so it is a no-op until two states were saved.
#[derive(Debug, Default, Clone)]
pub struct SearchHistory {
    past: Vec<SearchState>,
    future: Vec<SearchState>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new current state. Drops every redo target.
    pub fn save(&mut self, state: SearchState) {
        self.past.push(state);
        self.future.clear();
    }

    pub fn undo(&mut self) -> Option<SearchState> {
        if self.past.len() < 2 {
            return None;
        }
        let undone = self.past.pop()?;
        self.future.push(undone);
        self.past.last().cloned()
    }

    pub fn redo(&mut self) -> Option<SearchState> {
        let state = self.future.pop()?;
        self.past.push(state.clone());
        Some(state)
    }

    pub fn current(&self) -> Option<&SearchState> {
        self.past.last()
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() >= 2
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Every remembered state in chronological order, redo targets included.
    pub fn timeline(&self) -> impl Iterator<Item = &SearchState> {
        self.past.iter().chain(self.future.iter().rev())
    }
}
