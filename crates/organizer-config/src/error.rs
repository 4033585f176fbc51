//! Error types for configuration loading and parsing.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while loading or parsing configuration.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// I/O or filesystem read error.
    #[error("{message}")]
    Read {
        /// Path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },

    /// RON parse error.
    #[error("{message}")]
    Parse {
        /// Path associated with the parse error, when loading from a file.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },

    /// A settings-store string did not name a known mode.
    #[error("unknown target monitor mode: {value}")]
    UnknownMode {
        /// The offending store value.
        value: String,
    },
}

impl Error {
    /// Attach a file path to an error that was produced without one.
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Read { message, .. } => Self::Read {
                path: Some(path.to_path_buf()),
                message,
            },
            Self::Parse { message, .. } => Self::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        }
    }
}
