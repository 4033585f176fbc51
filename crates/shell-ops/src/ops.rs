//! Trait abstraction over shell operations to improve testability.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use parking_lot::Mutex;

use crate::{Error, MonitorIndex, Point, Rect, Result, WindowId, WindowType};

/// Operations the organizer needs from the host shell.
///
/// Queries are snapshots of live state and must be re-issued at each use; the
/// host finalizes window geometry asynchronously after creation, so nothing
/// here is stable across an await point. Per-window queries return `None` once
/// the handle is stale.
pub trait ShellOps: Send + Sync {
    /// Number of monitors in the current layout.
    fn monitor_count(&self) -> usize;
    /// Region of monitor `idx` in global coordinates.
    fn monitor_geometry(&self, idx: MonitorIndex) -> Option<Rect>;
    /// Host-defined fallback monitor ("current monitor").
    fn current_monitor(&self) -> MonitorIndex;
    /// Current pointer position in global coordinates.
    fn pointer_position(&self) -> Point;
    /// Window holding input focus, if any.
    fn focused_window(&self) -> Option<WindowId>;

    /// Window classification.
    fn window_type(&self, id: WindowId) -> Option<WindowType>;
    /// Window title, for diagnostics only.
    fn window_title(&self, id: WindowId) -> Option<String>;
    /// Monitor the window currently occupies.
    fn window_monitor(&self, id: WindowId) -> Option<MonitorIndex>;
    /// Current outer frame of the window.
    fn frame_rect(&self, id: WindowId) -> Option<Rect>;
    /// Whether the window is fullscreen.
    fn is_fullscreen(&self, id: WindowId) -> Option<bool>;
    /// Whether the window is maximized on either axis.
    fn is_maximized(&self, id: WindowId) -> Option<bool>;

    /// Reassign the window to monitor `idx`.
    fn move_to_monitor(&self, id: WindowId, idx: MonitorIndex) -> Result<()>;
    /// Move the window's frame origin to `(x, y)` in global coordinates.
    fn move_frame(&self, id: WindowId, x: i32, y: i32) -> Result<()>;
}

/// Scripted window state held by [`MockShellOps`].
#[derive(Clone, Debug)]
struct MockWindow {
    kind: WindowType,
    title: String,
    monitor: MonitorIndex,
    frame: Rect,
    fullscreen: bool,
    maximized: bool,
    /// Frames returned by successive `frame_rect` calls before the live frame
    /// takes over. Models the host settling a new window's size.
    frame_script: VecDeque<Rect>,
}

/// Simple mock implementation for tests.
#[derive(Clone, Default)]
pub struct MockShellOps {
    calls: Arc<Mutex<Vec<String>>>,
    monitors: Arc<Mutex<Vec<Rect>>>,
    current_monitor: Arc<Mutex<MonitorIndex>>,
    pointer: Arc<Mutex<(i32, i32)>>,
    focused: Arc<Mutex<Option<WindowId>>>,
    windows: Arc<Mutex<HashMap<WindowId, MockWindow>>>,
    moves: Arc<Mutex<Vec<(WindowId, i32, i32)>>>,
    monitor_moves: Arc<Mutex<Vec<(WindowId, MonitorIndex)>>>,
    fail_move_frame: Arc<AtomicBool>,
    fail_move_to_monitor: Arc<AtomicBool>,
}

impl MockShellOps {
    /// Create an empty mock with no monitors and no windows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the monitor layout.
    pub fn set_monitors(&self, regions: Vec<Rect>) {
        *self.monitors.lock() = regions;
    }

    /// Set the fallback monitor index.
    pub fn set_current_monitor(&self, idx: MonitorIndex) {
        *self.current_monitor.lock() = idx;
    }

    /// Set the pointer position.
    pub fn set_pointer(&self, x: i32, y: i32) {
        *self.pointer.lock() = (x, y);
    }

    /// Set or clear the focused window.
    pub fn set_focused(&self, id: Option<WindowId>) {
        *self.focused.lock() = id;
    }

    /// Add a window with the given classification, monitor and frame.
    pub fn add_window(&self, id: WindowId, kind: WindowType, monitor: MonitorIndex, frame: Rect) {
        self.windows.lock().insert(
            id,
            MockWindow {
                kind,
                title: format!("window-{id}"),
                monitor,
                frame,
                fullscreen: false,
                maximized: false,
                frame_script: VecDeque::new(),
            },
        );
    }

    /// Mark the window fullscreen.
    pub fn set_fullscreen(&self, id: WindowId, v: bool) {
        if let Some(w) = self.windows.lock().get_mut(&id) {
            w.fullscreen = v;
        }
    }

    /// Mark the window maximized.
    pub fn set_maximized(&self, id: WindowId, v: bool) {
        if let Some(w) = self.windows.lock().get_mut(&id) {
            w.maximized = v;
        }
    }

    /// Queue frames for successive `frame_rect` calls; once drained, queries
    /// return the live frame again.
    pub fn script_frames(&self, id: WindowId, frames: Vec<Rect>) {
        if let Some(w) = self.windows.lock().get_mut(&id) {
            w.frame_script = frames.into();
        }
    }

    /// Drop the window, simulating a handle going stale.
    pub fn remove_window(&self, id: WindowId) {
        self.windows.lock().remove(&id);
    }

    /// Whether a command with the given name was issued.
    pub fn calls_contains(&self, s: &str) -> bool {
        self.calls.lock().iter().any(|x| x == s)
    }

    /// Recorded `move_frame` targets for `id`, in order.
    pub fn frame_moves(&self, id: WindowId) -> Vec<(i32, i32)> {
        self.moves
            .lock()
            .iter()
            .filter(|(w, _, _)| *w == id)
            .map(|&(_, x, y)| (x, y))
            .collect()
    }

    /// Recorded `move_to_monitor` targets for `id`, in order.
    pub fn monitor_moves(&self, id: WindowId) -> Vec<MonitorIndex> {
        self.monitor_moves
            .lock()
            .iter()
            .filter(|(w, _)| *w == id)
            .map(|&(_, m)| m)
            .collect()
    }

    /// Make `move_frame` fail.
    pub fn set_fail_move_frame(&self, v: bool) {
        self.fail_move_frame.store(v, Ordering::SeqCst);
    }

    /// Make `move_to_monitor` fail.
    pub fn set_fail_move_to_monitor(&self, v: bool) {
        self.fail_move_to_monitor.store(v, Ordering::SeqCst);
    }

    fn note(&self, s: &str) {
        self.calls.lock().push(s.to_string());
    }
}

impl ShellOps for MockShellOps {
    fn monitor_count(&self) -> usize {
        self.monitors.lock().len()
    }

    fn monitor_geometry(&self, idx: MonitorIndex) -> Option<Rect> {
        self.monitors.lock().get(idx).copied()
    }

    fn current_monitor(&self) -> MonitorIndex {
        *self.current_monitor.lock()
    }

    fn pointer_position(&self) -> Point {
        let (x, y) = *self.pointer.lock();
        Point { x, y }
    }

    fn focused_window(&self) -> Option<WindowId> {
        *self.focused.lock()
    }

    fn window_type(&self, id: WindowId) -> Option<WindowType> {
        self.windows.lock().get(&id).map(|w| w.kind)
    }

    fn window_title(&self, id: WindowId) -> Option<String> {
        self.windows.lock().get(&id).map(|w| w.title.clone())
    }

    fn window_monitor(&self, id: WindowId) -> Option<MonitorIndex> {
        self.windows.lock().get(&id).map(|w| w.monitor)
    }

    fn frame_rect(&self, id: WindowId) -> Option<Rect> {
        let mut map = self.windows.lock();
        let w = map.get_mut(&id)?;
        if let Some(next) = w.frame_script.pop_front() {
            w.frame = next;
        }
        Some(w.frame)
    }

    fn is_fullscreen(&self, id: WindowId) -> Option<bool> {
        self.windows.lock().get(&id).map(|w| w.fullscreen)
    }

    fn is_maximized(&self, id: WindowId) -> Option<bool> {
        self.windows.lock().get(&id).map(|w| w.maximized)
    }

    fn move_to_monitor(&self, id: WindowId, idx: MonitorIndex) -> Result<()> {
        self.note("move_to_monitor");
        if self.fail_move_to_monitor.load(Ordering::SeqCst) {
            return Err(Error::Rejected);
        }
        if idx >= self.monitors.lock().len() {
            return Err(Error::InvalidMonitor(idx));
        }
        self.monitor_moves.lock().push((id, idx));
        match self.windows.lock().get_mut(&id) {
            Some(w) => {
                w.monitor = idx;
                Ok(())
            }
            None => Err(Error::WindowGone(id)),
        }
    }

    fn move_frame(&self, id: WindowId, x: i32, y: i32) -> Result<()> {
        self.note("move_frame");
        if self.fail_move_frame.load(Ordering::SeqCst) {
            return Err(Error::Rejected);
        }
        self.moves.lock().push((id, x, y));
        match self.windows.lock().get_mut(&id) {
            Some(w) => {
                w.frame.x = x;
                w.frame.y = y;
                Ok(())
            }
            None => Err(Error::WindowGone(id)),
        }
    }
}
