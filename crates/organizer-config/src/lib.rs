//! Configuration for the window organizer.
//!
//! Three persisted options drive placement. They are read through the
//! [`SettingsStore`] trait as a fresh snapshot per placement decision — the
//! backing store (a desktop settings daemon on a real host) can change
//! between window-creation events and must never be cached across them.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

mod error;
mod store;

pub use error::Error;
pub use store::{MemoryStore, SettingsStore};

/// Strategy for choosing the monitor a new window lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetMonitorMode {
    /// Monitor containing the mouse pointer.
    #[default]
    MouseCursor,
    /// Monitor of the currently focused window; degrades to `MouseCursor`
    /// when nothing is focused.
    FocusedWindow,
}

impl TargetMonitorMode {
    /// Settings-store string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MouseCursor => "mouse-cursor",
            Self::FocusedWindow => "focused-window",
        }
    }

    /// Parse a store value, falling back to the default for anything
    /// unrecognized. Settings daemons can hand back stale or hand-edited
    /// strings; those are not worth failing a placement over.
    pub fn from_store(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for TargetMonitorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetMonitorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "mouse-cursor" => Ok(Self::MouseCursor),
            "focused-window" => Ok(Self::FocusedWindow),
            other => Err(Error::UnknownMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Options read at each placement decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Strategy for choosing the target monitor.
    pub target_monitor_mode: TargetMonitorMode,
    /// Center new windows on the target monitor.
    pub center_windows: bool,
    /// Verbose diagnostic output; instrumentation only, never behavioral.
    pub debug_logging: bool,
}

impl Settings {
    /// Parse settings from RON text.
    pub fn from_ron(text: &str) -> Result<Self, Error> {
        ron::from_str(text).map_err(|e| Error::Parse {
            path: None,
            message: e.to_string(),
        })
    }
}

/// Load settings from a RON file at `path`.
pub fn load_from_path(path: &Path) -> Result<Settings, Error> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    Settings::from_ron(&text).map_err(|e| e.with_path(path))
}

#[cfg(test)]
mod tests {
    use std::{
        env, fs,
        path::PathBuf,
        process,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn unique_tmp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let mut dir = env::temp_dir();
        dir.push(format!("organizer-{name}-{}-{nanos}", process::id()));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn defaults_match_schema() {
        let s = Settings::default();
        assert_eq!(s.target_monitor_mode, TargetMonitorMode::MouseCursor);
        assert!(!s.center_windows);
        assert!(!s.debug_logging);
    }

    #[test]
    fn parses_full_document() {
        let s = Settings::from_ron(
            "(target_monitor_mode: FocusedWindow, center_windows: true, debug_logging: true)",
        )
        .unwrap();
        assert_eq!(s.target_monitor_mode, TargetMonitorMode::FocusedWindow);
        assert!(s.center_windows);
        assert!(s.debug_logging);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let s = Settings::from_ron("(center_windows: true)").unwrap();
        assert_eq!(s.target_monitor_mode, TargetMonitorMode::MouseCursor);
        assert!(s.center_windows);
        assert!(!s.debug_logging);
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        assert!(matches!(
            Settings::from_ron("(center_windows: maybe)"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn loads_settings_from_file() {
        let dir = unique_tmp_dir("load");
        let path = dir.join("settings.ron");
        fs::write(
            &path,
            "(target_monitor_mode: FocusedWindow, center_windows: true)",
        )
        .expect("write settings");
        let s = load_from_path(&path).expect("load settings");
        assert_eq!(s.target_monitor_mode, TargetMonitorMode::FocusedWindow);
        assert!(s.center_windows);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_errors_carry_the_file_path() {
        let dir = unique_tmp_dir("load-err");

        let missing = dir.join("absent.ron");
        match load_from_path(&missing) {
            Err(Error::Read { path, .. }) => assert_eq!(path.as_deref(), Some(missing.as_path())),
            other => panic!("expected read error, got {other:?}"),
        }

        let bad = dir.join("bad.ron");
        fs::write(&bad, "(center_windows: maybe)").expect("write settings");
        match load_from_path(&bad) {
            Err(Error::Parse { path, .. }) => assert_eq!(path.as_deref(), Some(bad.as_path())),
            other => panic!("expected parse error, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn mode_strings_round_trip() {
        for mode in [
            TargetMonitorMode::MouseCursor,
            TargetMonitorMode::FocusedWindow,
        ] {
            assert_eq!(mode.as_str().parse::<TargetMonitorMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_store_value_falls_back_to_default() {
        assert_eq!(
            TargetMonitorMode::from_store("follow-the-sun"),
            TargetMonitorMode::MouseCursor
        );
        assert!("follow-the-sun".parse::<TargetMonitorMode>().is_err());
    }
}
