//! exists / equals / which - Predicates and lookup
//!
//! These built-ins communicate through their exit status so they
//! compose with `&&` and `||`.

use std::path::Path;

use crate::interpreter::builtins;
use crate::interpreter::types::{ExecResult, ShellState};

/// `exists [file|dir] PATH` - status 0 iff the path exists (optionally
/// of the given kind).
pub fn handle_exists(_state: &mut ShellState, args: &[String]) -> ExecResult {
    let found = match args {
        [] => return ExecResult::failure("wsh: exists: expected PATH\n"),
        [path] => Path::new(path).exists(),
        [kind, path, ..] => match kind.as_str() {
            "file" => Path::new(path).is_file(),
            "dir" => Path::new(path).is_dir(),
            _ => Path::new(kind).exists(),
        },
    };
    ExecResult::status(if found { 0 } else { 1 })
}

/// `equals A B` - status 0 iff the strings match.
pub fn handle_equals(_state: &mut ShellState, args: &[String]) -> ExecResult {
    if args.len() < 2 {
        return ExecResult::failure("wsh: equals: expected two values\n");
    }
    ExecResult::status(if args[0] == args[1] { 0 } else { 1 })
}

/// `which NAME` - report whether the name is an alias, a built-in, or a
/// `PATH` executable.
pub fn handle_which(state: &mut ShellState, args: &[String]) -> ExecResult {
    let Some(name) = args.first() else {
        return ExecResult::failure("wsh: which: expected NAME\n");
    };

    if let Some(value) = state.aliases.get(name) {
        return ExecResult::output(format!("{}: aliased to {}\n", name, value));
    }
    if builtins::is_builtin(name) {
        return ExecResult::output(format!("{}: shell builtin\n", name));
    }
    if let Some(path) = state.executables.lookup(name) {
        return ExecResult::output(format!("{}\n", path));
    }

    ExecResult::new(format!("{} not found\n", name), String::new(), 1)
}
