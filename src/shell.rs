//! Shell Environment
//!
//! Owns the shell state and ties together startup, the per-line entry
//! point, the rc file, PATH bootstrap and history persistence. The main
//! binary drives this from its read loop.

use std::fs;
use std::path::{Path, PathBuf};

use crate::interpreter::evaluator;
use crate::interpreter::expansion::prompt::{load_prompt, render_prompt};
use crate::interpreter::expansion::tilde::home_dir;
use crate::interpreter::history;
use crate::interpreter::types::ShellState;

pub const SHELL_NAME: &str = "wsh";
pub const DEFAULT_PROMPT: &str = "$ ";
pub const RC_FILENAME: &str = ".wshrc";

/// The shell: state plus the line-level API.
pub struct Shell {
    pub state: ShellState,
}

impl Shell {
    /// Create a shell: bootstrap `PATH` if unset, advertise `SHELL`,
    /// load the prompt template and the persisted history.
    pub fn new() -> Self {
        bootstrap_path();
        std::env::set_var("SHELL", SHELL_NAME);

        let mut state = ShellState::new();
        state.prompt = load_prompt();
        history::load(&mut state);

        Self { state }
    }

    /// Enter silent mode (scripts, `-c`, piped stdin).
    pub fn set_silent(&mut self) {
        self.state.echo_input = false;
    }

    pub fn is_interactive(&self) -> bool {
        self.state.echo_input
    }

    /// Record and evaluate one entered line.
    pub fn run_line(&mut self, line: &str) -> i32 {
        history::record(&mut self.state, line);
        evaluator::run_line(&mut self.state, line)
    }

    /// Evaluate a multi-line script, stopping on `exit`.
    pub fn run_script(&mut self, contents: &str) -> i32 {
        for line in contents.lines() {
            evaluator::run_line(&mut self.state, line);
            if self.state.exit_request.is_some() {
                break;
            }
        }
        self.state.last_status
    }

    /// Render the prompt for display.
    pub fn render_prompt(&self) -> String {
        render_prompt(&self.state)
    }

    /// Execute `./.wshrc`, else `$HOME/.wshrc`, in silent mode.
    pub fn load_rc(&mut self) {
        let Some(path) = rc_path() else {
            return;
        };
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("failed to read {}: {}", path.display(), e);
                return;
            }
        };

        let echo_before = self.state.echo_input;
        self.state.echo_input = false;
        self.run_script(&contents);
        self.state.echo_input = echo_before;
    }

    pub fn save_history(&self) {
        history::save(&self.state);
    }

    /// The status the shell process terminates with.
    pub fn exit_status(&self) -> i32 {
        self.state.exit_request.unwrap_or(self.state.last_status)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

fn rc_path() -> Option<PathBuf> {
    let local = PathBuf::from(RC_FILENAME);
    if local.is_file() {
        return Some(local);
    }
    let home = PathBuf::from(home_dir()).join(RC_FILENAME);
    if home.is_file() {
        return Some(home);
    }
    None
}

/// When `PATH` is unset, assemble it from `/etc/paths` (one directory
/// per line) plus the lines of each regular file under `/etc/paths.d`.
fn bootstrap_path() {
    if std::env::var_os("PATH").is_some() {
        return;
    }

    let mut dirs = read_path_file(Path::new("/etc/paths"));

    if let Ok(entries) = fs::read_dir("/etc/paths.d") {
        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        for file in files {
            dirs.extend(read_path_file(&file));
        }
    }

    if !dirs.is_empty() {
        std::env::set_var("PATH", dirs.join(":"));
    }
}

fn read_path_file(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(contents) => contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_startup_state() {
        let shell = Shell::new();
        assert!(shell.is_interactive());
        assert_eq!(std::env::var("SHELL").unwrap(), "wsh");
        assert!(!shell.state.prompt.is_empty());
    }

    #[test]
    fn test_run_line_records_history() {
        let mut shell = Shell::new();
        shell.state.history.clear();
        shell.run_line("equals a a");
        assert_eq!(shell.state.history, vec!["equals a a"]);
        assert_eq!(shell.state.last_status, 0);
    }

    #[test]
    fn test_silent_mode_skips_history() {
        let mut shell = Shell::new();
        shell.state.history.clear();
        shell.set_silent();
        shell.run_line("equals a a");
        assert!(shell.state.history.is_empty());
    }

    #[test]
    fn test_run_script_stops_on_exit() {
        let mut shell = Shell::new();
        shell.set_silent();
        shell.run_script("equals a a\nexit 4\nequals a a");
        assert_eq!(shell.exit_status(), 4);
    }

    #[test]
    fn test_exit_status_defaults_to_last_status() {
        let mut shell = Shell::new();
        shell.set_silent();
        shell.run_line("equals a b");
        assert_eq!(shell.exit_status(), 1);
    }
}
