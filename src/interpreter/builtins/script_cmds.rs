//! run / source - Script execution
//!
//! `run FILE` launches a nested shell process on the file; `source FILE`
//! executes the file's lines inside this shell, in silent mode.

use crate::interpreter::evaluator;
use crate::interpreter::types::{ExecResult, ShellState};

pub fn handle_run(_state: &mut ShellState, args: &[String]) -> ExecResult {
    let Some(file) = args.first() else {
        return ExecResult::failure("wsh: run: expected FILE\n");
    };

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => return ExecResult::failure(format!("wsh: run: {}\n", e)),
    };

    match std::process::Command::new(exe).arg(file).status() {
        Ok(status) => ExecResult::status(status.code().unwrap_or(1)),
        Err(e) => ExecResult::failure(format!("wsh: run: {}: {}\n", file, e)),
    }
}

pub fn handle_source(state: &mut ShellState, args: &[String]) -> ExecResult {
    let Some(file) = args.first() else {
        return ExecResult::failure("wsh: source: expected FILE\n");
    };

    let contents = match std::fs::read_to_string(file) {
        Ok(contents) => contents,
        Err(e) => return ExecResult::failure(format!("wsh: source: {}: {}\n", file, e)),
    };

    let echo_before = state.echo_input;
    state.echo_input = false;

    for line in contents.lines() {
        evaluator::run_line(state, line);
        if state.exit_request.is_some() {
            break;
        }
    }

    state.echo_input = echo_before;
    ExecResult::status(state.last_status)
}
