//! Error types for shell command failures.

use thiserror::Error;

use crate::{MonitorIndex, WindowId};

/// Errors that can occur while commanding the host shell.
///
/// Queries never produce these; a stale handle surfaces as `None` from the
/// query itself. Only the two move commands are fallible.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The window handle became invalid before the command was applied.
    #[error("window {0} gone")]
    WindowGone(WindowId),

    /// The monitor index does not exist in the host's current layout.
    #[error("invalid monitor index {0}")]
    InvalidMonitor(MonitorIndex),

    /// The host refused the command (e.g. the window is not movable).
    #[error("command rejected by host")]
    Rejected,
}

/// Result alias for shell command outcomes.
pub type Result<T> = std::result::Result<T, Error>;
