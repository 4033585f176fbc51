//! Live settings-store boundary.

use parking_lot::Mutex;

use crate::Settings;

/// Read access to the live settings store.
///
/// The organizer takes one snapshot per placement decision and never caches
/// it beyond that decision. On a real host this is backed by the desktop's
/// settings daemon; [`MemoryStore`] serves embedders and tests.
pub trait SettingsStore: Send + Sync {
    /// Current settings values.
    fn snapshot(&self) -> Settings;
}

/// In-memory settings store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Settings>,
}

impl MemoryStore {
    /// Create a store holding `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(settings),
        }
    }

    /// Replace the stored settings.
    pub fn set(&self, settings: Settings) {
        *self.inner.lock() = settings;
    }
}

impl SettingsStore for MemoryStore {
    fn snapshot(&self) -> Settings {
        *self.inner.lock()
    }
}
