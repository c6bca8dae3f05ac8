//! Interpreter Types
//!
//! Shell state shared across the evaluator, built-ins and process
//! manager, plus the result type built-ins return.

use std::collections::HashMap;

use crate::interpreter::command_resolution::ExecutableMap;

/// A variable saved by `with`: its prior value, or `None` if it was
/// unset before.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedVar {
    pub name: String,
    pub prior: Option<String>,
}

/// One `with` invocation's save frame.
pub type WithFrame = Vec<SavedVar>;

/// Suspended jobs, oldest first. Slot numbers for `kill %N` are 1-based.
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    pids: Vec<i32>,
}

impl JobTable {
    pub fn push(&mut self, pid: i32) {
        self.pids.push(pid);
    }

    /// Remove and return the most recently suspended PID.
    pub fn pop(&mut self) -> Option<i32> {
        self.pids.pop()
    }

    /// Look up a 1-based slot.
    pub fn slot(&self, n: usize) -> Option<i32> {
        if n == 0 {
            return None;
        }
        self.pids.get(n - 1).copied()
    }

    /// Remove a 1-based slot and return its PID.
    pub fn remove_slot(&mut self, n: usize) -> Option<i32> {
        if n == 0 || n > self.pids.len() {
            return None;
        }
        Some(self.pids.remove(n - 1))
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }
}

/// Complete shell state.
///
/// Built-ins run in-process and mutate this directly; the environment
/// itself is process-wide (`std::env`), so only the shell-local pieces
/// live here.
#[derive(Debug, Default)]
pub struct ShellState {
    /// Exit status of the last executed command
    pub last_status: i32,
    /// Consume-once flag set by `&&`/`||`: the next command is skipped
    pub skip_next: bool,
    /// False in silent mode (scripts, rc files, `silence true`)
    pub echo_input: bool,
    /// Previous working directory, for `cd -`
    pub previous_dir: String,
    /// Alias definitions (name -> replacement command string)
    pub aliases: HashMap<String, String>,
    /// PATH basename -> absolute path map
    pub executables: ExecutableMap,
    /// History list, most recent first
    pub history: Vec<String>,
    /// Raw prompt template from `WSH_PROMPT`
    pub prompt: String,
    /// Stack of `with` save frames
    pub with_scopes: Vec<WithFrame>,
    /// Suspended jobs
    pub jobs: JobTable,
    /// PID of the last background launch
    pub last_background_pid: Option<i32>,
    /// Set by `exit`; the driver stops and the shell terminates with it
    pub exit_request: Option<i32>,
    /// Set by `fg`; the driver sends SIGCONT and resumes the wait
    pub resume_request: Option<i32>,
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            echo_input: true,
            ..Default::default()
        }
    }
}

/// Execution result of a built-in.
///
/// Built-ins never write to the terminal themselves; the driver routes
/// `stdout`/`stderr` to the terminal, a pipe, or a capture buffer
/// depending on where the command sits.
#[derive(Debug, Clone)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecResult {
    pub fn new(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Success with no output
    pub fn ok() -> Self {
        Self::new(String::new(), String::new(), 0)
    }

    /// Success with stdout text
    pub fn output(stdout: impl Into<String>) -> Self {
        Self::new(stdout.into(), String::new(), 0)
    }

    /// Failure with stderr message
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self::new(String::new(), stderr.into(), 1)
    }

    /// Silent status-only result
    pub fn status(exit_code: i32) -> Self {
        Self::new(String::new(), String::new(), exit_code)
    }
}

impl Default for ExecResult {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_table_slots() {
        let mut jobs = JobTable::default();
        jobs.push(100);
        jobs.push(200);

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs.slot(1), Some(100));
        assert_eq!(jobs.slot(2), Some(200));
        assert_eq!(jobs.slot(0), None);
        assert_eq!(jobs.slot(3), None);

        assert_eq!(jobs.remove_slot(1), Some(100));
        assert_eq!(jobs.slot(1), Some(200));
        assert_eq!(jobs.pop(), Some(200));
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_exec_result_helpers() {
        let ok = ExecResult::ok();
        assert_eq!(ok.exit_code, 0);
        assert!(ok.stdout.is_empty());

        let fail = ExecResult::failure("bad\n");
        assert_eq!(fail.exit_code, 1);
        assert_eq!(fail.stderr, "bad\n");

        assert_eq!(ExecResult::status(7).exit_code, 7);
    }

    #[test]
    fn test_new_state_echoes_input() {
        let state = ShellState::new();
        assert!(state.echo_input);
        assert_eq!(state.last_status, 0);
        assert!(!state.skip_next);
    }
}
