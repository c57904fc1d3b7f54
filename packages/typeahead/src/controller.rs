use std::sync::Arc;

use livability_locator::{LocatorError, LocatorService, SEARCH_FAILED_MESSAGE};
use livability_locator_models::{LocationDetail, SearchResult};
use tokio::sync::mpsc;

use crate::state::{Key, Phase, SelectionState};
use crate::timer::TimerSlot;
use crate::view::{DetailPanel, DropdownEntry, TypeaheadView};
use crate::{Command, Snapshot, TypeaheadConfig, TypeaheadEvent, TypeaheadHandle};

/// Messages the controller sends itself from timers and request tasks.
enum Internal {
    DebounceElapsed {
        generation: u64,
    },
    BlurElapsed {
        generation: u64,
    },
    SearchDone {
        seq: u64,
        query: String,
        result: Result<Vec<SearchResult>, LocatorError>,
    },
    DetailDone {
        seq: u64,
        name: String,
        result: Result<LocationDetail, LocatorError>,
    },
}

/// Typeahead state machine. Create with [`TypeaheadController::new`],
/// then drive it with [`TypeaheadController::run`].
pub struct TypeaheadController<V> {
    config: TypeaheadConfig,
    locator: Arc<dyn LocatorService>,
    view: V,
    selection: SelectionState,
    phase: Phase,
    commands: mpsc::UnboundedReceiver<Command>,
    internal_tx: mpsc::UnboundedSender<Internal>,
    internal_rx: mpsc::UnboundedReceiver<Internal>,
    debounce: TimerSlot,
    blur: TimerSlot,
    search_seq: u64,
    detail_seq: u64,
}

impl<V: TypeaheadView> TypeaheadController<V> {
    /// Creates a controller and the handle used to feed it events.
    #[must_use]
    pub fn new(
        locator: Arc<dyn LocatorService>,
        view: V,
        config: TypeaheadConfig,
    ) -> (Self, TypeaheadHandle) {
        let (tx, commands) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let controller = Self {
            config,
            locator,
            view,
            selection: SelectionState::default(),
            phase: Phase::Idle,
            commands,
            internal_tx,
            internal_rx,
            debounce: TimerSlot::default(),
            blur: TimerSlot::default(),
            search_seq: 0,
            detail_seq: 0,
        };
        (controller, TypeaheadHandle { tx })
    }

    /// Processes events until every [`TypeaheadHandle`] is dropped, then
    /// returns the view.
    ///
    /// Requests still in flight at shutdown are left to finish; their
    /// results are dropped.
    pub async fn run(mut self) -> V {
        loop {
            tokio::select! {
                biased;
                Some(message) = self.internal_rx.recv() => self.on_internal(message),
                command = self.commands.recv() => match command {
                    Some(Command::Event(event)) => self.on_event(event),
                    Some(Command::Snapshot(reply)) => {
                        let _ = reply.send(self.snapshot());
                    }
                    None => break,
                },
            }
        }

        self.debounce.cancel();
        self.blur.cancel();
        log::debug!("typeahead controller stopped");
        self.view
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            selection: self.selection.clone(),
        }
    }

    fn on_event(&mut self, event: TypeaheadEvent) {
        match event {
            TypeaheadEvent::QueryChanged(text) => self.on_query_changed(text),
            TypeaheadEvent::Key(key) => self.on_key(key),
            TypeaheadEvent::Select(index) => self.select_result(index),
            TypeaheadEvent::Focus => {
                self.blur.cancel();
            }
            TypeaheadEvent::Blur => {
                self.blur
                    .arm(self.config.blur_grace, &self.internal_tx, |generation| {
                        Internal::BlurElapsed { generation }
                    });
            }
            TypeaheadEvent::OutsidePointer => {
                self.blur.cancel();
                self.dismiss_dropdown();
            }
        }
    }

    fn on_internal(&mut self, message: Internal) {
        match message {
            Internal::DebounceElapsed { generation } => {
                if self.debounce.take_if_current(generation) {
                    let query = self.selection.query.trim().to_string();
                    self.search(query);
                }
            }
            Internal::BlurElapsed { generation } => {
                if self.blur.take_if_current(generation) {
                    self.dismiss_dropdown();
                }
            }
            Internal::SearchDone { seq, query, result } => {
                self.on_search_done(seq, &query, result);
            }
            Internal::DetailDone { seq, name, result } => {
                self.on_detail_done(seq, &name, result);
            }
        }
    }

    fn on_query_changed(&mut self, text: String) {
        self.selection.query = text;
        self.abandon_detail();

        if self.selection.query.trim().chars().count() < self.config.min_query_len {
            self.debounce.cancel();
            self.go_idle();
            return;
        }

        self.debounce
            .arm(self.config.debounce, &self.internal_tx, |generation| {
                Internal::DebounceElapsed { generation }
            });
        self.phase = Phase::Pending;
    }

    fn search(&mut self, query: String) {
        self.search_seq += 1;
        let seq = self.search_seq;
        log::debug!("search #{seq}: {query:?}");

        let locator = Arc::clone(&self.locator);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = locator.search(&query).await;
            let _ = tx.send(Internal::SearchDone { seq, query, result });
        });
    }

    fn on_search_done(
        &mut self,
        seq: u64,
        query: &str,
        result: Result<Vec<SearchResult>, LocatorError>,
    ) {
        if seq != self.search_seq {
            log::debug!("discarding stale search #{seq} for {query:?}");
            return;
        }

        match result {
            Ok(results) if results.is_empty() => {
                log::debug!("search #{seq}: no results");
                self.go_idle();
            }
            Ok(results) => {
                log::debug!("search #{seq}: {} result(s)", results.len());
                let entries: Vec<DropdownEntry> = results.iter().map(DropdownEntry::from).collect();
                self.selection.replace_results(results);
                self.view.hide_error();
                self.view.show_dropdown(&entries);
                self.phase = Phase::Listing;
            }
            Err(e) => {
                log::warn!("Search for {query:?} failed: {e}");
                self.go_idle();
                self.view.show_error(SEARCH_FAILED_MESSAGE);
            }
        }
    }

    fn on_key(&mut self, key: Key) {
        match key {
            Key::ArrowDown => {
                if self.selection.move_down() {
                    self.view.highlight(self.selection.highlighted());
                }
            }
            Key::ArrowUp => {
                if self.selection.move_up() {
                    self.view.highlight(self.selection.highlighted());
                }
            }
            Key::Enter => {
                if let Some(index) = self.selection.highlighted() {
                    self.select_result(index);
                }
            }
            Key::Escape => {
                self.debounce.cancel();
                self.go_idle();
            }
        }
    }

    fn select_result(&mut self, index: usize) {
        let Some(result) = self.selection.results().get(index) else {
            log::debug!(
                "ignoring selection {index}: {} result(s) listed",
                self.selection.results().len()
            );
            return;
        };
        let name = result.location.clone();

        self.blur.cancel();
        self.debounce.cancel();
        self.invalidate_search();

        self.selection.query.clone_from(&name);
        self.view.set_query_text(&name);
        self.selection.clear_results();
        self.view.hide_dropdown();

        self.load_detail(name);
    }

    fn load_detail(&mut self, name: String) {
        self.phase = Phase::Loading;
        self.view.hide_error();
        self.view.show_loading();

        self.detail_seq += 1;
        let seq = self.detail_seq;
        log::debug!("detail #{seq}: {name:?}");

        let locator = Arc::clone(&self.locator);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = locator.location(&name).await;
            let _ = tx.send(Internal::DetailDone { seq, name, result });
        });
    }

    fn on_detail_done(
        &mut self,
        seq: u64,
        name: &str,
        result: Result<LocationDetail, LocatorError>,
    ) {
        if seq != self.detail_seq {
            log::debug!("discarding stale detail #{seq} for {name:?}");
            return;
        }

        self.view.hide_loading();
        match result {
            Ok(detail) => {
                self.view.show_detail(&DetailPanel::from(&detail));
                self.phase = Phase::Detail;
            }
            Err(e) => {
                log::warn!("Loading {name:?} failed: {e}");
                self.view.hide_dropdown();
                self.view.hide_detail();
                self.view.show_error(e.detail_message());
                self.phase = Phase::Error;
            }
        }
    }

    /// Hides the dropdown after a blur or outside click. A pending
    /// debounce is left armed.
    fn dismiss_dropdown(&mut self) {
        self.selection.clear_results();
        self.view.hide_dropdown();
        if self.phase == Phase::Listing {
            self.phase = Phase::Idle;
        }
    }

    fn go_idle(&mut self) {
        self.invalidate_search();
        self.selection.clear_results();
        self.view.hide_dropdown();
        self.phase = Phase::Idle;
    }

    /// Drops interest in a detail load still in flight.
    fn abandon_detail(&mut self) {
        if self.phase == Phase::Loading {
            self.detail_seq += 1;
            self.view.hide_loading();
            log::debug!("abandoning detail load");
        }
    }

    /// Makes any in-flight search response stale.
    const fn invalidate_search(&mut self) {
        self.search_seq += 1;
    }
}
