//! set / unset / ladd / radd - Environment mutation
//!
//! `ladd` prepends and `radd` appends to an existing value, which is how
//! `PATH`-style lists are edited. Any mutation of `PATH` invalidates the
//! executable map.

use crate::interpreter::types::{ExecResult, ShellState};

fn set_env(state: &mut ShellState, name: &str, value: &str) {
    std::env::set_var(name, value);
    if name == "PATH" {
        state.executables.mark_dirty();
    }
}

pub fn handle_set(state: &mut ShellState, args: &[String]) -> ExecResult {
    if args.len() < 2 {
        return ExecResult::failure("wsh: set: expected NAME VALUE\n");
    }
    set_env(state, &args[0], &args[1]);
    ExecResult::ok()
}

pub fn handle_unset(state: &mut ShellState, args: &[String]) -> ExecResult {
    let Some(name) = args.first() else {
        return ExecResult::failure("wsh: unset: expected NAME\n");
    };
    std::env::remove_var(name);
    if name == "PATH" {
        state.executables.mark_dirty();
    }
    ExecResult::ok()
}

pub fn handle_ladd(state: &mut ShellState, args: &[String]) -> ExecResult {
    if args.len() < 2 {
        return ExecResult::failure("wsh: ladd: expected NAME VALUE\n");
    }
    let current = std::env::var(&args[0]).unwrap_or_default();
    set_env(state, &args[0], &format!("{}{}", args[1], current));
    ExecResult::ok()
}

pub fn handle_radd(state: &mut ShellState, args: &[String]) -> ExecResult {
    if args.len() < 2 {
        return ExecResult::failure("wsh: radd: expected NAME VALUE\n");
    }
    let current = std::env::var(&args[0]).unwrap_or_default();
    set_env(state, &args[0], &format!("{}{}", current, args[1]));
    ExecResult::ok()
}
