//! Built-in Commands
//!
//! Built-ins run in the parent shell and mutate [`ShellState`] directly;
//! their terminal output travels back through the returned
//! [`ExecResult`], which the evaluator routes to the terminal, a pipe,
//! or a capture buffer. A built-in given too few arguments returns exit
//! status 1 without touching any state.

pub mod alias_cmd;
pub mod cd_cmd;
pub mod env_cmds;
pub mod job_cmds;
pub mod misc_cmds;
pub mod query_cmds;
pub mod script_cmds;
pub mod with_cmd;

use std::collections::BTreeMap;

use crate::interpreter::types::{ExecResult, ShellState};

pub type BuiltinFn = fn(&mut ShellState, &[String]) -> ExecResult;

lazy_static::lazy_static! {
    /// Name -> handler table. Ordered so `about` and `which` list
    /// built-ins alphabetically.
    pub static ref BUILTINS: BTreeMap<&'static str, BuiltinFn> = {
        let mut m: BTreeMap<&'static str, BuiltinFn> = BTreeMap::new();
        m.insert("about", misc_cmds::handle_about as BuiltinFn);
        m.insert("alias", alias_cmd::handle_alias);
        m.insert("and", misc_cmds::handle_and);
        m.insert("cd", cd_cmd::handle_cd);
        m.insert("equals", query_cmds::handle_equals);
        m.insert("exists", query_cmds::handle_exists);
        m.insert("exit", misc_cmds::handle_exit);
        m.insert("fg", job_cmds::handle_fg);
        m.insert("history", misc_cmds::handle_history);
        m.insert("kill", job_cmds::handle_kill);
        m.insert("ladd", env_cmds::handle_ladd);
        m.insert("or", misc_cmds::handle_or);
        m.insert("radd", env_cmds::handle_radd);
        m.insert("reload", misc_cmds::handle_reload);
        m.insert("run", script_cmds::handle_run);
        m.insert("set", env_cmds::handle_set);
        m.insert("silence", misc_cmds::handle_silence);
        m.insert("source", script_cmds::handle_source);
        m.insert("unalias", alias_cmd::handle_unalias);
        m.insert("unset", env_cmds::handle_unset);
        m.insert("which", query_cmds::handle_which);
        m.insert("with", with_cmd::handle_with);
        m.insert("without", with_cmd::handle_without);
        m
    };
}

/// Look up a built-in handler.
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    BUILTINS.get(name).copied()
}

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains_key(name)
}
