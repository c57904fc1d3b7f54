//! Single-slot cancellable timer.
//!
//! Arming the slot aborts whatever timer it held and bumps a generation
//! counter. The fired message carries the generation it was armed with,
//! so a timer that had already fired and queued its message before being
//! replaced is still recognised as stale by [`TimerSlot::take_if_current`].

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct TimerSlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl TimerSlot {
    /// Replaces the pending timer, if any, with one that sends
    /// `message(generation)` on `tx` after `delay`.
    pub fn arm<M, F>(&mut self, delay: Duration, tx: &UnboundedSender<M>, message: F)
    where
        M: Send + 'static,
        F: FnOnce(u64) -> M + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        let tx = tx.clone();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the controller shuts down.
            let _ = tx.send(message(generation));
        }));
    }

    /// Invalidates the pending timer. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.handle.take().is_some_and(|handle| {
            handle.abort();
            true
        })
    }

    /// Consumes a fired timer. Returns `false` if `generation` has been
    /// superseded by a later [`arm`](Self::arm) or [`cancel`](Self::cancel).
    pub fn take_if_current(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.handle.is_some() {
            self.handle = None;
            true
        } else {
            false
        }
    }

    /// Whether a timer is armed and not yet consumed.
    #[cfg(test)]
    pub const fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
