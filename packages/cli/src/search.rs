//! Drives a typeahead controller from the terminal.

use std::sync::Arc;
use std::time::Duration;

use livability_config::ClientConfig;
use livability_locator::HttpLocator;
use livability_typeahead::{Phase, Snapshot, TypeaheadConfig, TypeaheadController, TypeaheadHandle};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::terminal::TerminalTypeaheadView;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// A running controller plus the handle feeding it.
pub struct SearchSession {
    handle: TypeaheadHandle,
    task: JoinHandle<TerminalTypeaheadView>,
    wait_limit: Duration,
}

impl SearchSession {
    /// Spawns a controller against the configured Locator Service.
    pub fn start(config: &ClientConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let locator = HttpLocator::new(&config.locator.base_url, config.http.timeout())?;
        let settings = TypeaheadConfig::from(&config.typeahead);
        let (controller, handle) = TypeaheadController::new(
            Arc::new(locator),
            TerminalTypeaheadView::default(),
            settings,
        );

        Ok(Self {
            handle,
            task: tokio::spawn(controller.run()),
            wait_limit: settings.debounce + config.http.timeout() + Duration::from_secs(1),
        })
    }

    /// Types `text` one character at a time and waits for the search
    /// triggered by the final keystroke to settle.
    pub async fn type_text(&self, text: &str) -> Result<Snapshot, Box<dyn std::error::Error>> {
        let mut typed = String::with_capacity(text.len());
        for c in text.chars() {
            typed.push(c);
            self.handle.query_changed(typed.clone())?;
        }
        self.settle(Phase::Pending).await
    }

    /// Selects a listed result and waits for its detail to load.
    pub async fn select(&self, index: usize) -> Result<Snapshot, Box<dyn std::error::Error>> {
        self.handle.select(index)?;
        self.settle(Phase::Loading).await
    }

    /// Stops the controller.
    pub async fn finish(self) -> Result<(), Box<dyn std::error::Error>> {
        drop(self.handle);
        self.task.await?;
        Ok(())
    }

    async fn settle(&self, busy: Phase) -> Result<Snapshot, Box<dyn std::error::Error>> {
        let deadline = Instant::now() + self.wait_limit;
        loop {
            let snapshot = self.handle.snapshot().await?;
            if snapshot.phase != busy {
                return Ok(snapshot);
            }
            if Instant::now() >= deadline {
                return Err(format!("Timed out waiting in {busy} phase").into());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// `livability search <text> [--select <index>]`.
pub async fn run(
    config: &ClientConfig,
    text: &str,
    select: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = SearchSession::start(config)?;
    let snapshot = session.type_text(text).await?;
    let listed = snapshot.selection.results().len();

    if let Some(index) = select {
        if index >= listed {
            session.finish().await?;
            return Err(format!("No result #{index}: {listed} listed").into());
        }
        let snapshot = session.select(index).await?;
        if snapshot.phase == Phase::Error {
            session.finish().await?;
            return Err("Location detail could not be loaded".into());
        }
    } else if listed == 0 && snapshot.phase == Phase::Idle {
        log::info!("No locations matched {text:?}");
    }

    session.finish().await
}
