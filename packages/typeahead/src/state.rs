//! Selection state and controller phases.

use livability_locator_models::SearchResult;
use strum_macros::{AsRefStr, Display, EnumString};

/// Where the controller is in the search → select → detail flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum Phase {
    /// No dropdown.
    Idle,
    /// Debounce armed or search in flight.
    Pending,
    /// Results displayed.
    Listing,
    /// Detail fetch in flight.
    Loading,
    /// Detail rendered.
    Detail,
    /// Detail lookup failed.
    Error,
}

/// Keys the controller reacts to, named as the browser names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum Key {
    /// Move the highlight down one entry.
    ArrowDown,
    /// Move the highlight up one entry, or off the list.
    ArrowUp,
    /// Commit the highlighted entry.
    Enter,
    /// Dismiss the dropdown.
    Escape,
}

/// Query text, current result list and keyboard highlight.
///
/// `highlighted_index` stays within `-1..results.len()`; `-1` means
/// nothing is highlighted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Text currently in the input.
    pub query: String,
    results: Vec<SearchResult>,
    highlighted_index: isize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            highlighted_index: -1,
        }
    }
}

impl SelectionState {
    /// Results of the most recent search, in service order.
    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Raw highlight index, `-1` when nothing is highlighted.
    #[must_use]
    pub const fn highlighted_index(&self) -> isize {
        self.highlighted_index
    }

    /// Highlighted position, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        usize::try_from(self.highlighted_index).ok()
    }

    /// Replaces the result list wholesale and clears the highlight.
    pub fn replace_results(&mut self, results: Vec<SearchResult>) {
        self.results = results;
        self.highlighted_index = -1;
    }

    /// Drops all results.
    pub fn clear_results(&mut self) {
        self.replace_results(Vec::new());
    }

    /// Moves the highlight down, stopping at the last entry. Returns
    /// `true` if the highlight changed.
    pub fn move_down(&mut self) -> bool {
        let last = last_index(self.results.len());
        let next = (self.highlighted_index + 1).min(last);
        self.set_highlight(next)
    }

    /// Moves the highlight up, stopping at `-1`. Returns `true` if the
    /// highlight changed.
    pub fn move_up(&mut self) -> bool {
        let next = (self.highlighted_index - 1).max(-1);
        self.set_highlight(next)
    }

    fn set_highlight(&mut self, next: isize) -> bool {
        let changed = next != self.highlighted_index;
        self.highlighted_index = next;
        changed
    }
}

fn last_index(len: usize) -> isize {
    isize::try_from(len).map_or(isize::MAX, |n| n - 1)
}
