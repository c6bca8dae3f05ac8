//! cd - Change directory
//!
//! `cd DIR` changes the working directory; `cd -` changes to the
//! previous directory and prints it. The pre-change directory is saved
//! as the new previous directory either way.

use crate::interpreter::types::{ExecResult, ShellState};

pub fn handle_cd(state: &mut ShellState, args: &[String]) -> ExecResult {
    let Some(arg) = args.first() else {
        return ExecResult::failure("wsh: cd: missing directory\n");
    };

    let (target, print_target) = if arg == "-" {
        if state.previous_dir.is_empty() {
            return ExecResult::failure("wsh: cd: no previous directory\n");
        }
        (state.previous_dir.clone(), true)
    } else {
        (arg.clone(), false)
    };

    let before = std::env::current_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Err(e) = std::env::set_current_dir(&target) {
        return ExecResult::failure(format!("wsh: cd: {}: {}\n", target, e));
    }

    state.previous_dir = before;

    if print_target {
        ExecResult::output(format!("{}\n", target))
    } else {
        ExecResult::ok()
    }
}
