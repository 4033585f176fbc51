//! Ticker for scheduling deferred and repeated callbacks with cancellation.
//!
//! Placement work never runs inline in the event handler: decisions are
//! deferred once, and centering polls on an interval. Each scheduled unit is
//! keyed by id so a newer session for the same window replaces an in-flight
//! one, and everything can be drained on unload.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use parking_lot::Mutex;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// What a repeating callback wants next, mirroring the host's
/// reschedule/remove return convention for timed callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Run again on the next interval.
    Continue,
    /// Stop; the source is removed.
    Remove,
}

struct TickerEntry {
    seq: u64,
    token: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

/// Minimal ticker core: one-shot callbacks after a delay, and repeating
/// callbacks that decide their own fate each tick. Supports cancellation and
/// an async drain for shutdown.
#[derive(Clone, Default)]
pub struct Ticker {
    entries: Arc<Mutex<HashMap<String, TickerEntry>>>,
    next_seq: Arc<AtomicU64>,
}

impl Ticker {
    /// Create an empty ticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a callback is scheduled for the given id.
    pub fn is_active(&self, id: &str) -> bool {
        self.entries.lock().contains_key(id)
    }

    fn insert(
        &self,
        id: String,
        seq: u64,
        token: CancellationToken,
        handle: tokio::task::JoinHandle<()>,
    ) {
        self.entries
            .lock()
            .insert(id, TickerEntry { seq, token, handle });
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    /// Remove the entry for `id` only if it still belongs to `seq`; a newer
    /// entry under the same id stays untouched.
    fn retire(entries: &Mutex<HashMap<String, TickerEntry>>, id: &str, seq: u64) {
        let mut map = entries.lock();
        if map.get(id).is_some_and(|e| e.seq == seq) {
            map.remove(id);
        }
    }

    /// Schedule `f` to run once after `delay`, replacing any callback
    /// already scheduled under `id`.
    pub fn once<F>(&self, id: String, delay: Duration, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.stop(&id);

        let token = CancellationToken::new();
        let cancel = token.clone();
        let seq = self.next_seq();
        let entries = Arc::clone(&self.entries);
        let id_for_task = id.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = time::sleep(delay) => f(),
                _ = cancel.cancelled() => {
                    trace!(id = %id_for_task, "once_cancelled");
                }
            }
            Self::retire(&entries, &id_for_task, seq);
        });
        self.insert(id, seq, token, handle);
    }

    /// Start a repeating callback for `id`: first run after `initial`, then
    /// every `interval` until it returns [`Tick::Remove`] or is stopped.
    pub fn repeating<F>(&self, id: String, initial: Duration, interval: Duration, mut f: F)
    where
        F: FnMut() -> Tick + Send + 'static,
    {
        self.stop(&id);

        let token = CancellationToken::new();
        let cancel = token.clone();
        let seq = self.next_seq();
        let entries = Arc::clone(&self.entries);
        let id_for_task = id.clone();

        let handle = tokio::spawn(async move {
            trace!(
                id = %id_for_task,
                init_ms = initial.as_millis(),
                int_ms = interval.as_millis(),
                "ticker_start"
            );

            // Initial delay with cancellation
            tokio::select! {
                _ = time::sleep(initial) => {}
                _ = cancel.cancelled() => {
                    trace!(id = %id_for_task, "ticker_cancelled_initial");
                    Self::retire(&entries, &id_for_task, seq);
                    return;
                }
            }

            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        trace!(id = %id_for_task, "ticker_cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        if f() == Tick::Remove {
                            trace!(id = %id_for_task, "ticker_done");
                            break;
                        }
                    }
                }
            }
            Self::retire(&entries, &id_for_task, seq);
        });
        self.insert(id, seq, token, handle);
    }

    /// Stop a scheduled callback if present (non-blocking).
    pub fn stop(&self, id: &str) {
        if let Some(entry) = self.entries.lock().remove(id) {
            entry.token.cancel();
            // Don't abort the handle; let it wind down via the token.
            trace!(id = %id, "ticker_stop");
        }
    }

    /// Cancel and wait for all scheduled callbacks to finish.
    pub async fn clear(&self) {
        let entries: Vec<TickerEntry> = {
            let mut map = self.entries.lock();
            map.drain().map(|(_, e)| e).collect()
        };

        for e in &entries {
            e.token.cancel();
        }
        for e in entries {
            let _ = e.handle.await;
        }
        trace!("ticker_clear");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn once_fires_after_delay() {
        let ticker = Ticker::new();
        let fired = Arc::new(AtomicU32::new(0));
        let f = Arc::clone(&fired);
        ticker.once("a".into(), Duration::from_millis(50), move || {
            f.fetch_add(1, Ordering::SeqCst);
        });
        time::sleep(Duration::from_millis(49)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        time::sleep(Duration::from_millis(1)).await;
        assert!(!ticker.is_active("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn repeating_self_terminates() {
        let ticker = Ticker::new();
        let ticks = Arc::new(AtomicU32::new(0));
        let t = Arc::clone(&ticks);
        ticker.repeating(
            "r".into(),
            Duration::from_millis(40),
            Duration::from_millis(40),
            move || {
                let n = t.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= 3 { Tick::Remove } else { Tick::Continue }
            },
        );
        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(!ticker.is_active("r"));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_previous_entry() {
        let ticker = Ticker::new();
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));
        let f1 = Arc::clone(&first);
        ticker.once("w".into(), Duration::from_millis(50), move || {
            f1.fetch_add(1, Ordering::SeqCst);
        });
        let f2 = Arc::clone(&second);
        ticker.once("w".into(), Duration::from_millis(50), move || {
            f2.fetch_add(1, Ordering::SeqCst);
        });
        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert!(!ticker.is_active("w"));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_in_flight() {
        let ticker = Ticker::new();
        let ticks = Arc::new(AtomicU32::new(0));
        let t = Arc::clone(&ticks);
        ticker.repeating(
            "r".into(),
            Duration::from_millis(40),
            Duration::from_millis(40),
            move || {
                t.fetch_add(1, Ordering::SeqCst);
                Tick::Continue
            },
        );
        time::sleep(Duration::from_millis(90)).await;
        ticker.clear().await;
        let seen = ticks.load(Ordering::SeqCst);
        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen);
        assert!(!ticker.is_active("r"));
    }
}
