#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location typeahead controller.
//!
//! The controller is a message-driven state machine over
//! [`SelectionState`]. User actions (keystrokes, clicks, focus changes)
//! arrive as [`TypeaheadEvent`]s through a [`TypeaheadHandle`]; timers and
//! network completions are fed back into the same loop, so only one
//! handler ever runs at a time.
//!
//! Flow:
//!
//! 1. [`TypeaheadEvent::QueryChanged`] arms the debounce timer (a single
//!    slot: re-arming invalidates the previous timer before it can fire).
//! 2. When the timer fires the query is sent to the [`LocatorService`]
//!    and the results are listed.
//! 3. Arrow keys move a clamped highlight; Enter or a click selects.
//! 4. Selecting loads the location detail and renders it.
//!
//! Every search and detail request carries a sequence number, and a
//! response that arrives after a newer request of the same kind was
//! issued is discarded.
//!
//! [`LocatorService`]: livability_locator::LocatorService

mod controller;
pub mod state;
mod timer;
pub mod view;

use std::time::Duration;

use livability_config::TypeaheadSettings;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

pub use controller::TypeaheadController;
pub use state::{Key, Phase, SelectionState};
pub use view::{DetailField, DetailPanel, DropdownEntry, TypeaheadView};

/// Errors from talking to a running controller.
#[derive(Debug, Error)]
pub enum TypeaheadError {
    /// The controller loop has exited.
    #[error("Typeahead controller is no longer running")]
    Closed,
}

/// Controller timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeaheadConfig {
    /// Quiet period after the last keystroke before searching.
    pub debounce: Duration,
    /// Delay between blur and dropdown dismissal.
    pub blur_grace: Duration,
    /// Shortest trimmed query that triggers a search.
    pub min_query_len: usize,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self::from(&TypeaheadSettings::default())
    }
}

impl From<&TypeaheadSettings> for TypeaheadConfig {
    fn from(settings: &TypeaheadSettings) -> Self {
        Self {
            debounce: Duration::from_millis(settings.debounce_ms),
            blur_grace: Duration::from_millis(settings.blur_grace_ms),
            min_query_len: settings.min_query_len,
        }
    }
}

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeaheadEvent {
    /// The input text changed.
    QueryChanged(String),
    /// A navigation key was pressed in the input.
    Key(Key),
    /// A dropdown entry was clicked.
    Select(usize),
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,
    /// The pointer went down outside both the input and the dropdown.
    OutsidePointer,
}

/// Point-in-time copy of the controller's state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Current phase.
    pub phase: Phase,
    /// Query, results and highlight.
    pub selection: SelectionState,
}

pub(crate) enum Command {
    Event(TypeaheadEvent),
    Snapshot(oneshot::Sender<Snapshot>),
}

/// Sending side of a controller's event queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TypeaheadHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl TypeaheadHandle {
    /// Queues an event.
    ///
    /// # Errors
    ///
    /// Returns [`TypeaheadError::Closed`] if the controller has stopped.
    pub fn send(&self, event: TypeaheadEvent) -> Result<(), TypeaheadError> {
        self.tx
            .send(Command::Event(event))
            .map_err(|_| TypeaheadError::Closed)
    }

    /// Queues [`TypeaheadEvent::QueryChanged`].
    ///
    /// # Errors
    ///
    /// Returns [`TypeaheadError::Closed`] if the controller has stopped.
    pub fn query_changed(&self, text: impl Into<String>) -> Result<(), TypeaheadError> {
        self.send(TypeaheadEvent::QueryChanged(text.into()))
    }

    /// Queues [`TypeaheadEvent::Key`].
    ///
    /// # Errors
    ///
    /// Returns [`TypeaheadError::Closed`] if the controller has stopped.
    pub fn key(&self, key: Key) -> Result<(), TypeaheadError> {
        self.send(TypeaheadEvent::Key(key))
    }

    /// Queues [`TypeaheadEvent::Select`].
    ///
    /// # Errors
    ///
    /// Returns [`TypeaheadError::Closed`] if the controller has stopped.
    pub fn select(&self, index: usize) -> Result<(), TypeaheadError> {
        self.send(TypeaheadEvent::Select(index))
    }

    /// Asks the controller for a copy of its state. The answer reflects
    /// every event queued before this call.
    ///
    /// # Errors
    ///
    /// Returns [`TypeaheadError::Closed`] if the controller has stopped.
    pub async fn snapshot(&self) -> Result<Snapshot, TypeaheadError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Snapshot(reply))
            .map_err(|_| TypeaheadError::Closed)?;
        rx.await.map_err(|_| TypeaheadError::Closed)
    }
}
