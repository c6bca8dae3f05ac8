//! fg / kill - Job control
//!
//! `fg` asks the driver to SIGCONT the most recently suspended job and
//! resume the foreground wait (the wait itself cannot happen here; the
//! evaluator owns it). `kill` sends SIGTERM to a numeric PID or to a
//! suspended slot addressed as `%N`.

use crate::interpreter::process;
use crate::interpreter::types::{ExecResult, ShellState};

pub fn handle_fg(state: &mut ShellState, _args: &[String]) -> ExecResult {
    match state.jobs.pop() {
        Some(pid) => {
            state.resume_request = Some(pid);
            ExecResult::ok()
        }
        None => ExecResult::failure("wsh: fg: no suspended jobs\n"),
    }
}

pub fn handle_kill(state: &mut ShellState, args: &[String]) -> ExecResult {
    let Some(target) = args.first() else {
        return ExecResult::failure("wsh: kill: expected PID or %N\n");
    };

    let pid = if let Some(slot) = target.strip_prefix('%') {
        let n = match slot.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                return ExecResult::failure(format!("wsh: kill: {}: invalid job spec\n", target))
            }
        };
        match state.jobs.remove_slot(n) {
            Some(pid) => pid,
            None => return ExecResult::failure(format!("wsh: kill: {}: no such job\n", target)),
        }
    } else {
        match target.parse::<i32>() {
            Ok(pid) => pid,
            Err(_) => {
                return ExecResult::failure(format!("wsh: kill: {}: invalid pid\n", target))
            }
        }
    };

    match process::send_term(pid) {
        Ok(()) => ExecResult::ok(),
        Err(e) => ExecResult::failure(format!("wsh: kill: {}: {}\n", pid, e.desc())),
    }
}
