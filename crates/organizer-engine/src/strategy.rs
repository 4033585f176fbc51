//! Target-monitor selection.

use organizer_config::TargetMonitorMode;
use shell_ops::{MonitorIndex, WindowId, geom, ops::ShellOps};
use tracing::trace;

/// Index of the first monitor whose region contains the point, in the host's
/// enumeration order; the host's fallback monitor when none does (e.g. the
/// pointer sits in a dead zone between offset monitors).
pub fn monitor_at_point(shell: &dyn ShellOps, x: i32, y: i32) -> MonitorIndex {
    for idx in 0..shell.monitor_count() {
        if let Some(region) = shell.monitor_geometry(idx)
            && geom::point_in_rect(x, y, &region)
        {
            return idx;
        }
    }
    shell.current_monitor()
}

/// Monitor that new windows should land on.
///
/// Focused-window mode uses the focused window's monitor; with no focus
/// target (or a stale one) it silently degrades to pointer mode. A designed
/// fallback, not an error.
pub fn resolve_target_monitor(shell: &dyn ShellOps, mode: TargetMonitorMode) -> MonitorIndex {
    if mode == TargetMonitorMode::FocusedWindow {
        if let Some(focused) = shell.focused_window()
            && let Some(monitor) = shell.window_monitor(focused)
        {
            trace!(monitor, "target monitor from focused window");
            return monitor;
        }
        trace!("no focused window; falling back to pointer");
    }
    let p = shell.pointer_position();
    let monitor = monitor_at_point(shell, p.x, p.y);
    trace!(x = p.x, y = p.y, monitor, "target monitor from pointer");
    monitor
}

/// Whether the window should keep its host-assigned placement.
///
/// `None` means the handle went stale. Decouples the policy from the host's
/// maximize-flag encoding.
pub fn is_fullscreen_or_maximized(shell: &dyn ShellOps, id: WindowId) -> Option<bool> {
    Some(shell.is_fullscreen(id)? || shell.is_maximized(id)?)
}
