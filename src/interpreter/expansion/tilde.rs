//! Tilde Expansion
//!
//! Replaces each `~` in unquoted and double-quoted text with the
//! invoking user's home directory.

use nix::unistd::{Uid, User};

/// The invoking user's home directory: `$HOME`, falling back to the
/// passwd entry for the current uid.
pub fn home_dir() -> String {
    if let Ok(home) = std::env::var("HOME") {
        return home;
    }
    User::from_uid(Uid::current())
        .ok()
        .flatten()
        .map(|u| u.dir.to_string_lossy().into_owned())
        .unwrap_or_else(|| "/".to_string())
}

/// Replace every `~` with the home directory.
pub fn expand_tilde(value: &str) -> String {
    if !value.contains('~') {
        return value.to_string();
    }
    value.replace('~', &home_dir())
}
