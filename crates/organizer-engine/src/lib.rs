//! Organizer Engine
//!
//! The engine reacts to window-creation events from the host shell:
//! - filters out everything but normal application windows
//! - defers the placement decision until the host has settled the window
//! - picks the target monitor (pointer- or focus-based)
//! - relocates across monitors, then centers or preserves relative position
//! - drives a bounded retry loop for centering windows whose size is not yet
//!   known at creation time
//!
//! All failure conditions are silent early returns: a stale handle, an
//! out-of-range monitor, or an exhausted retry cap leaves the host's default
//! placement standing. There is no caller to surface errors to.
//!
//! The public API is small: [`Engine`] plus the [`Timing`] knobs, with the
//! strategy helpers re-exported for embedders that only want the decision
//! math. `on_window_created` must be called from within a tokio runtime; the
//! embedding shell owns the event loop.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use organizer_config::SettingsStore;
use shell_ops::{MonitorIndex, Rect, WindowId, WindowType, geom, ops::ShellOps};
use tracing::{debug, trace};

pub mod strategy;
mod ticker;

pub use strategy::{is_fullscreen_or_maximized, monitor_at_point, resolve_target_monitor};
pub use ticker::{Tick, Ticker};

/// Delay before the deferred placement decision, letting the host finish its
/// own initial placement and monitor assignment.
const DEFER_DELAY_MS: u64 = 50;
/// Interval between centering attempts.
const RETRY_INTERVAL_MS: u64 = 40;
/// Centering attempts before giving up on a window that never settles.
const MAX_CENTER_ATTEMPTS: u32 = 8;
/// Position slack accepted as "already centered"; the host rounds frame
/// coordinates during placement.
const CENTER_TOLERANCE: i32 = 1;

/// Timing knobs for deferral and the centering retry loop.
#[derive(Clone, Copy, Debug)]
pub struct Timing {
    /// Delay between the creation event and the placement decision.
    pub defer_delay: Duration,
    /// Interval between centering retry ticks.
    pub retry_interval: Duration,
    /// Maximum number of centering attempts per window.
    pub max_center_attempts: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            defer_delay: Duration::from_millis(DEFER_DELAY_MS),
            retry_interval: Duration::from_millis(RETRY_INTERVAL_MS),
            max_center_attempts: MAX_CENTER_ATTEMPTS,
        }
    }
}

/// Engine coordinates placement for newly created windows.
///
/// Construct via [`Engine::new`] with the shell boundary and settings store,
/// then feed it creation events via [`Engine::on_window_created`]. Each event
/// is handled independently; sessions for different windows never share
/// state.
#[derive(Clone)]
pub struct Engine {
    /// Host shell boundary; queried fresh at every use, never cached.
    shell: Arc<dyn ShellOps>,
    /// Live settings; one snapshot per placement decision.
    settings: Arc<dyn SettingsStore>,
    /// Scheduler for the deferred decision and retry sessions.
    ticker: Ticker,
    /// Deferral/retry timing.
    timing: Timing,
    /// Set on shutdown; stops new sessions while in-flight ones self-stop.
    disabled: Arc<AtomicBool>,
}

impl Engine {
    /// Create a new engine with default timing.
    pub fn new(shell: Arc<dyn ShellOps>, settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_timing(shell, settings, Timing::default())
    }

    /// Create a new engine with explicit timing.
    pub fn with_timing(
        shell: Arc<dyn ShellOps>,
        settings: Arc<dyn SettingsStore>,
        timing: Timing,
    ) -> Self {
        Self {
            shell,
            settings,
            ticker: Ticker::new(),
            timing,
            disabled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle a window-created notification from the host.
    ///
    /// Runs the entry filter synchronously and schedules the deferred
    /// decision; everything else happens on the ticker. Dialogs, popups and
    /// stale handles are left to the host's default placement.
    pub fn on_window_created(&self, id: WindowId) {
        if self.disabled.load(Ordering::SeqCst) {
            return;
        }
        let Some(kind) = self.shell.window_type(id) else {
            trace!(window = id, "window-created skipped: window gone");
            return;
        };
        if kind != WindowType::Normal {
            trace!(window = id, ?kind, "window-created ignored: not a normal window");
            return;
        }
        if let Some(title) = self.shell.window_title(id) {
            debug!(window = id, title = %title, "window created");
        }

        let engine = self.clone();
        self.ticker
            .once(format!("defer:{id}"), self.timing.defer_delay, move || {
                engine.evaluate(id);
            });
    }

    /// Whether a deferred decision or retry session is pending for `id`.
    pub fn is_pending(&self, id: WindowId) -> bool {
        self.ticker.is_active(&format!("defer:{id}")) || self.ticker.is_active(&format!("center:{id}"))
    }

    /// Stop producing sessions and drain in-flight scheduled work.
    pub async fn shutdown(&self) {
        self.disabled.store(true, Ordering::SeqCst);
        self.ticker.clear().await;
        debug!("engine shut down");
    }

    /// The deferred placement decision. Every geometry value is queried fresh
    /// here; the host may have re-placed the window since the creation event.
    fn evaluate(&self, id: WindowId) {
        let shell = self.shell.as_ref();
        let Some(current) = shell.window_monitor(id) else {
            trace!(window = id, "placement skipped after delay: window gone");
            return;
        };
        let settings = self.settings.snapshot();
        let target = strategy::resolve_target_monitor(shell, settings.target_monitor_mode);
        let count = shell.monitor_count();
        if target >= count {
            debug!(window = id, target, count, "invalid target monitor");
            return;
        }
        let Some(frame) = shell.frame_rect(id) else {
            return;
        };
        let Some(source_region) = shell.monitor_geometry(current) else {
            return;
        };
        let Some(target_region) = shell.monitor_geometry(target) else {
            return;
        };
        let changed = target != current;
        debug!(
            window = id,
            current,
            target,
            center = settings.center_windows,
            ?frame,
            "placing window"
        );

        // Monitor assignment is independent of centering eligibility: relocate
        // first on every path, then center or reposition.
        if changed {
            if let Err(e) = shell.move_to_monitor(id, target) {
                debug!(window = id, target, error = %e, "monitor move rejected");
                return;
            }
        }

        if settings.center_windows {
            match strategy::is_fullscreen_or_maximized(shell, id) {
                None => trace!(window = id, "centering skipped: window gone"),
                Some(true) => {
                    debug!(window = id, "centering skipped: fullscreen or maximized");
                }
                Some(false) => {
                    self.center_once(id, &target_region);
                    self.start_center_retries(id, target);
                }
            }
        } else if changed {
            // Mirror the frame's offset from the old monitor's origin onto the
            // new one, clamped to stay fully on-screen.
            let pos = geom::relative_reposition(&frame, &source_region, &target_region);
            trace!(window = id, x = pos.x, y = pos.y, "relative reposition");
            if let Err(e) = shell.move_frame(id, pos.x, pos.y) {
                debug!(window = id, error = %e, "frame move rejected");
            }
        }
    }

    /// Immediate centering pass. Skipped without consuming anything when the
    /// frame size has not settled yet; the retry session owns that case.
    fn center_once(&self, id: WindowId, region: &Rect) {
        let Some(frame) = self.shell.frame_rect(id) else {
            return;
        };
        if !frame.has_size() {
            return;
        }
        let pos = geom::centered_origin(&frame, region);
        if !geom::approx_at(&frame, pos, CENTER_TOLERANCE)
            && let Err(e) = self.shell.move_frame(id, pos.x, pos.y)
        {
            debug!(window = id, error = %e, "center move rejected");
        }
    }

    /// Start the bounded retry session that centers `id` on `monitor` once
    /// its frame size settles. Each tick consumes exactly one attempt; the
    /// session removes itself on success, invalidation, or the attempt cap.
    fn start_center_retries(&self, id: WindowId, monitor: MonitorIndex) {
        let shell = Arc::clone(&self.shell);
        let max = self.timing.max_center_attempts;
        let mut attempts = 0u32;
        trace!(window = id, monitor, max, "start centering retries");

        self.ticker.repeating(
            format!("center:{id}"),
            self.timing.retry_interval,
            self.timing.retry_interval,
            move || {
                match strategy::is_fullscreen_or_maximized(shell.as_ref(), id) {
                    None => {
                        trace!(window = id, "center retries stopped: window gone");
                        return Tick::Remove;
                    }
                    Some(true) => {
                        debug!(window = id, "center retries stopped: fullscreen or maximized");
                        return Tick::Remove;
                    }
                    Some(false) => {}
                }
                let Some(frame) = shell.frame_rect(id) else {
                    return Tick::Remove;
                };
                attempts += 1;
                if !frame.has_size() {
                    trace!(window = id, attempt = attempts, max, "frame size not settled");
                    return if attempts < max {
                        Tick::Continue
                    } else {
                        debug!(window = id, "centering abandoned: attempt cap reached");
                        Tick::Remove
                    };
                }
                let Some(region) = shell.monitor_geometry(monitor) else {
                    return Tick::Remove;
                };
                let pos = geom::centered_origin(&frame, &region);
                let centered = geom::approx_at(&frame, pos, CENTER_TOLERANCE);
                trace!(
                    window = id,
                    attempt = attempts,
                    max,
                    ?frame,
                    x = pos.x,
                    y = pos.y,
                    centered,
                    "center attempt"
                );
                if !centered
                    && let Err(e) = shell.move_frame(id, pos.x, pos.y)
                {
                    debug!(window = id, error = %e, "center move rejected");
                    return Tick::Remove;
                }
                if centered {
                    debug!(window = id, attempts, "centering finished");
                    Tick::Remove
                } else if attempts >= max {
                    debug!(window = id, "centering abandoned: attempt cap reached");
                    Tick::Remove
                } else {
                    Tick::Continue
                }
            },
        );
    }
}
