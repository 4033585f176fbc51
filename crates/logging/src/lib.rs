//! Shared logging helpers and tracing utilities for the organizer workspace.
//!
//! The organizer has no CLI of its own; the embedding shell decides when to
//! install a subscriber. These helpers build crate-scoped filter specs so the
//! `debug-logging` setting (and `RUST_LOG`) map onto tracing filters in one
//! place.

use std::env;

use tracing_subscriber::EnvFilter;

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &["organizer_engine", "organizer_config", "shell_ops", "logging"]
}

/// Build a filter directive string that sets the same `level` for all of our
/// crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    let parts: Vec<String> = our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect();
    parts.join(",")
}

/// Compute the filter spec with precedence:
/// - `debug` (the `debug-logging` setting) → crate-scoped `debug`
/// - `RUST_LOG` when set
/// - default crate-scoped `info`
pub fn filter_spec(debug: bool) -> String {
    if debug {
        return level_spec_for("debug");
    }
    env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("info"))
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install a formatting subscriber with the filter for `debug`.
///
/// Returns false when a global subscriber was already installed; the existing
/// one wins.
pub fn init(debug: bool) -> bool {
    let filter = env_filter_from_spec(&filter_spec(debug));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_all_crates() {
        let spec = level_spec_for("Debug");
        for target in our_crates() {
            assert!(spec.contains(&format!("{}=debug", target)));
        }
    }

    #[test]
    fn debug_flag_wins_over_default() {
        assert_eq!(filter_spec(true), level_spec_for("debug"));
    }
}
