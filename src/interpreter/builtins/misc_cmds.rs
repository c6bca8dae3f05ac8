//! exit / and / or / silence / reload / history / about

use crate::interpreter::builtins::BUILTINS;
use crate::interpreter::expansion::prompt::load_prompt;
use crate::interpreter::history;
use crate::interpreter::types::{ExecResult, ShellState};
use crate::shell::SHELL_NAME;

/// `exit [N]` - request shell termination with status N.
pub fn handle_exit(state: &mut ShellState, args: &[String]) -> ExecResult {
    let code = args
        .first()
        .and_then(|a| a.parse::<i32>().ok())
        .unwrap_or(0);
    state.exit_request = Some(code);
    ExecResult::status(code)
}

/// `and` - skip the next command unless the last status was 0.
pub fn handle_and(state: &mut ShellState, _args: &[String]) -> ExecResult {
    if state.last_status != 0 {
        state.skip_next = true;
    }
    ExecResult::status(state.last_status)
}

/// `or` - skip the next command unless the last status was non-zero.
pub fn handle_or(state: &mut ShellState, _args: &[String]) -> ExecResult {
    if state.last_status == 0 {
        state.skip_next = true;
    }
    ExecResult::status(state.last_status)
}

/// `silence BOOL` - toggle silent mode.
pub fn handle_silence(state: &mut ShellState, args: &[String]) -> ExecResult {
    let Some(arg) = args.first() else {
        return ExecResult::failure("wsh: silence: expected true or false\n");
    };
    state.echo_input = !matches!(arg.as_str(), "true" | "1");
    ExecResult::ok()
}

/// `reload` - rebuild the executable map and re-read the prompt.
pub fn handle_reload(state: &mut ShellState, _args: &[String]) -> ExecResult {
    state.executables.mark_dirty();
    state.prompt = load_prompt();
    ExecResult::ok()
}

/// `history` - print the history list, oldest first.
pub fn handle_history(state: &mut ShellState, _args: &[String]) -> ExecResult {
    ExecResult::output(history::render(state))
}

/// `about` - print version and the built-in table.
pub fn handle_about(_state: &mut ShellState, _args: &[String]) -> ExecResult {
    let mut out = format!("{} v{}\n\n", SHELL_NAME, env!("CARGO_PKG_VERSION"));
    out.push_str("List of builtin commands:\n");
    for name in BUILTINS.keys() {
        out.push_str(&format!("  {}\n", name));
    }
    ExecResult::output(out)
}
