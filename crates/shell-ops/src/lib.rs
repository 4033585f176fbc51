//! shell-ops: narrow boundary over the host shell's window and monitor state.
//!
//! The organizer never talks to the compositor directly. Everything it needs —
//! monitor enumeration, pointer position, per-window queries, and the two move
//! commands — goes through the [`ops::ShellOps`] trait, implemented by an
//! adapter over the real shell on a live system and by [`ops::MockShellOps`]
//! in tests.
//!
//! Window handles are identities, not owned objects: the host can invalidate
//! one at any moment, so every per-window query returns `Option` and `None`
//! means the handle went stale.

mod error;
pub mod geom;
pub mod ops;

pub use error::{Error, Result};
pub use geom::{Point, Rect};

/// Identifier for a live window owned by the host shell.
pub type WindowId = u32;

/// Index of a monitor in the host's enumeration order.
pub type MonitorIndex = usize;

/// Coarse window classification as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowType {
    /// Top-level application window; the only kind the organizer places.
    Normal,
    /// Transient dialog; left to the host's default placement.
    Dialog,
    /// Popup, menu, tooltip and similar override-redirect surfaces.
    Popup,
    /// Anything else the host reports (docks, notifications, splash).
    Other,
}
