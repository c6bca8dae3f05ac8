//! History
//!
//! The history list is kept most-recent first. A newly entered line is
//! prepended iff it is non-empty, the shell is not in silent mode, and
//! it differs from the current head. The list is persisted to
//! `$HOME/.wsh_history` (oldest first on disk) at shutdown and loaded
//! at startup; evaluation never consults it.

use std::fs;
use std::path::PathBuf;

use crate::interpreter::expansion::tilde::home_dir;
use crate::interpreter::types::ShellState;

pub const HISTORY_FILENAME: &str = ".wsh_history";

/// Path of the persistent history file.
pub fn history_path() -> PathBuf {
    PathBuf::from(home_dir()).join(HISTORY_FILENAME)
}

/// Record an entered line, applying the prepend rules.
pub fn record(state: &mut ShellState, line: &str) {
    let line = line.trim();
    if line.is_empty() || !state.echo_input {
        return;
    }
    if state.history.first().map(|s| s.as_str()) == Some(line) {
        return;
    }
    state.history.insert(0, line.to_string());
}

/// Load history from `path`, newest entry last on disk.
pub fn load_from(state: &mut ShellState, path: &std::path::Path) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return,
    };
    state.history = contents
        .lines()
        .rev()
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect();
}

/// Save history to `path`, oldest entry first.
pub fn save_to(state: &ShellState, path: &std::path::Path) {
    let mut contents = String::new();
    for line in state.history.iter().rev() {
        contents.push_str(line);
        contents.push('\n');
    }
    if let Err(e) = fs::write(path, contents) {
        log::warn!("failed to save history to {}: {}", path.display(), e);
    }
}

pub fn load(state: &mut ShellState) {
    load_from(state, &history_path());
}

pub fn save(state: &ShellState) {
    save_to(state, &history_path());
}

/// Render the list for the `history` built-in, oldest first.
pub fn render(state: &ShellState) -> String {
    let mut out = String::new();
    for (i, line) in state.history.iter().rev().enumerate() {
        out.push_str(&format!("{:5}  {}\n", i + 1, line));
    }
    out
}
