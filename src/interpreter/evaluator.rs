//! Evaluator / Pipeline Driver
//!
//! Walks a parsed command list in order. Per command: consume the skip
//! flag set by `&&`/`||`, rewrite alias heads, expand words, wire pipes,
//! and dispatch to a built-in (in-process) or an external process.
//!
//! Piped stages are spawned without waiting; the pipeline is collected
//! when its final stage runs. Conditional chains are left-associative: a
//! skipped command's own `&&`/`||` terminator is still evaluated against
//! the unchanged last status.

use std::io::Write;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};

use nix::unistd::Pid;

use crate::ast::types::{Command, CommandList};
use crate::interpreter::alias_expansion::resolve_alias_head;
use crate::interpreter::builtins::{self, with_cmd, BuiltinFn};
use crate::interpreter::command_resolution::resolve_command;
use crate::interpreter::expansion::expand_words;
use crate::interpreter::process::{self, make_pipe, PipeEnds};
use crate::interpreter::types::{ExecResult, ShellState};
use crate::parser::parse;

/// Evaluate one input line. Lex/parse errors discard the line with a
/// diagnostic and leave the last status unchanged.
pub fn run_line(state: &mut ShellState, line: &str) -> i32 {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return state.last_status;
    }

    match parse(trimmed) {
        Ok(list) => run_list(state, list.commands, None),
        Err(e) => {
            eprintln!("wsh: {}", e);
            state.last_status
        }
    }
}

/// Evaluate a sub-command list with stdout+stderr captured through a
/// dedicated pipe. Each capture opens a fresh pipe; captures are
/// serialized by construction.
pub fn run_captured(state: &mut ShellState, list: &CommandList) -> String {
    let PipeEnds { read, write } = match make_pipe() {
        Ok(pipe) => pipe,
        Err(e) => {
            log::warn!("sub-command capture pipe failed: {}", e);
            return String::new();
        }
    };

    run_list(state, list.commands.clone(), Some(&write));
    drop(write);
    process::read_all(read)
}

/// Walk a command list. `capture` is the write end final output is
/// routed to when evaluating a sub-command.
pub fn run_list(
    state: &mut ShellState,
    mut commands: Vec<Command>,
    capture: Option<&OwnedFd>,
) -> i32 {
    let mut pending_input: Option<OwnedFd> = None;
    let mut pipeline_pids: Vec<Pid> = Vec::new();
    let mut i = 0;

    while i < commands.len() {
        if state.exit_request.is_some() {
            break;
        }

        if state.skip_next {
            state.skip_next = false;
            let cmd = &commands[i];
            if cmd.and_next && state.last_status != 0 {
                state.skip_next = true;
            }
            if cmd.or_next && state.last_status == 0 {
                state.skip_next = true;
            }
            i += 1;
            continue;
        }

        if let Err(e) = resolve_alias_head(state, &mut commands, i) {
            eprintln!("wsh: {}", e);
            state.last_status = 1;
            i += 1;
            continue;
        }
        let cmd = match commands.get(i) {
            Some(cmd) => cmd.clone(),
            None => break,
        };

        let argv = expand_words(state, &cmd.words);
        if argv.first().map_or(true, |head| head.is_empty()) {
            i += 1;
            continue;
        }

        let status = match builtins::lookup(&argv[0]) {
            Some(handler) => run_builtin(
                state,
                handler,
                &cmd,
                &argv,
                &mut pending_input,
                &mut pipeline_pids,
                capture,
            ),
            None => run_external(
                state,
                &cmd,
                &argv,
                &mut pending_input,
                &mut pipeline_pids,
                capture,
            ),
        };

        // The first completed command after `with` closes one scope frame.
        if argv[0] != "with" && argv[0] != "without" {
            with_cmd::close_one_frame(state);
        }

        if !cmd.pipe_next {
            state.last_status = status;
        }
        if cmd.and_next {
            state.skip_next = state.last_status != 0;
        }
        if cmd.or_next {
            state.skip_next = state.last_status == 0;
        }

        i += 1;
    }

    // A trailing pipe stage without a consumer is still collected.
    drop(pending_input);
    finish_pipeline(state, &mut pipeline_pids);

    state.last_status
}

/// Run a built-in in-process, routing its output to the terminal, the
/// next pipe stage, or the capture buffer.
fn run_builtin(
    state: &mut ShellState,
    handler: BuiltinFn,
    cmd: &Command,
    argv: &[String],
    pending_input: &mut Option<OwnedFd>,
    pipeline_pids: &mut Vec<Pid>,
    capture: Option<&OwnedFd>,
) -> i32 {
    // Built-ins do not read stdin; dropping the read end unblocks any
    // upstream writer.
    drop(pending_input.take());

    let result = handler(state, &argv[1..]);

    if cmd.pipe_next {
        match make_pipe() {
            Ok(PipeEnds { read, write }) => {
                let _ = process::write_all(&write, result.stdout.as_bytes());
                let _ = process::write_all(&write, result.stderr.as_bytes());
                drop(write);
                *pending_input = Some(read);
            }
            Err(e) => {
                eprintln!("wsh: {}: {}", argv[0], e);
                return 1;
            }
        }
    } else {
        deliver_output(&result, capture);
        finish_pipeline(state, pipeline_pids);
    }

    // `fg` arms a resume request; the driver owns the wait.
    if let Some(pid) = state.resume_request.take() {
        return process::resume_job(state, pid);
    }

    result.exit_code
}

/// Spawn an external command with the current pipe wiring.
fn run_external(
    state: &mut ShellState,
    cmd: &Command,
    argv: &[String],
    pending_input: &mut Option<OwnedFd>,
    pipeline_pids: &mut Vec<Pid>,
    capture: Option<&OwnedFd>,
) -> i32 {
    let path = resolve_command(&mut state.executables, &argv[0]);
    let input = pending_input.take();

    if cmd.pipe_next {
        let pipe = match make_pipe() {
            Ok(pipe) => pipe,
            Err(e) => {
                eprintln!("wsh: {}: {}", argv[0], e);
                return 1;
            }
        };

        let mut also_close: Vec<RawFd> = vec![pipe.read.as_raw_fd()];
        if let Some(fd) = capture {
            also_close.push(fd.as_raw_fd());
        }

        match process::spawn(&path, argv, input.as_ref(), Some(&pipe.write), &also_close) {
            Ok(pid) => {
                pipeline_pids.push(pid);
                *pending_input = Some(pipe.read);
                state.last_status
            }
            Err(e) => {
                eprintln!("wsh: {}: {}", argv[0], e);
                1
            }
        }
    } else {
        match process::spawn(&path, argv, input.as_ref(), capture, &[]) {
            Ok(pid) => {
                drop(input);
                finish_pipeline(state, pipeline_pids);
                if cmd.background {
                    state.last_background_pid = Some(pid.as_raw());
                    // Launch succeeded; the child's eventual exit is not
                    // observed here.
                    0
                } else {
                    process::wait_foreground(state, pid)
                }
            }
            Err(e) => {
                eprintln!("wsh: {}: {}", argv[0], e);
                finish_pipeline(state, pipeline_pids);
                1
            }
        }
    }
}

fn deliver_output(result: &ExecResult, capture: Option<&OwnedFd>) {
    if let Some(fd) = capture {
        let _ = process::write_all(fd, result.stdout.as_bytes());
        let _ = process::write_all(fd, result.stderr.as_bytes());
    } else {
        print!("{}", result.stdout);
        eprint!("{}", result.stderr);
        std::io::stdout().flush().ok();
        std::io::stderr().flush().ok();
    }
}

/// Wait for all outstanding pipeline stages, oldest first.
fn finish_pipeline(state: &mut ShellState, pids: &mut Vec<Pid>) {
    for pid in pids.drain(..) {
        let status = process::wait_foreground(state, pid);
        state.last_status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(state: &mut ShellState, input: &str) -> String {
        run_captured(state, &parse(input).unwrap())
    }

    #[test]
    fn test_pipeline_bytes_flow() {
        let mut state = ShellState::new();
        assert_eq!(capture(&mut state, "echo hello | tr a-z A-Z"), "HELLO\n");
        assert_eq!(state.last_status, 0);
    }

    #[test]
    fn test_conditional_chain_scenario() {
        let mut state = ShellState::new();
        let out = capture(&mut state, "false && echo x ; true || echo y ; echo z");
        assert_eq!(out, "z\n");
    }

    #[test]
    fn test_and_chain_is_left_associative() {
        let mut state = ShellState::new();
        let out = capture(&mut state, "false && echo a && echo b ; echo end");
        assert_eq!(out, "end\n");
    }

    #[test]
    fn test_and_propagates_failing_status() {
        let mut state = ShellState::new();
        run_line(&mut state, "false && echo x");
        assert_eq!(state.last_status, 1);
    }

    #[test]
    fn test_variable_expansion_in_pipeline() {
        let mut state = ShellState::new();
        std::env::set_var("WSH_TEST_EVAL_X", "foo");
        let out = capture(&mut state, "echo \"{WSH_TEST_EVAL_X}bar\" | cat");
        assert_eq!(out, "foobar\n");
        std::env::remove_var("WSH_TEST_EVAL_X");
    }

    #[test]
    fn test_subcommand_splices_into_argument() {
        let mut state = ShellState::new();
        assert_eq!(capture(&mut state, "echo a`echo b`c"), "abc\n");
    }

    #[test]
    fn test_subcommand_inside_double_quotes() {
        let mut state = ShellState::new();
        assert_eq!(
            capture(&mut state, "echo \"one `echo two` three\""),
            "one two three\n"
        );
    }

    #[test]
    fn test_builtin_output_feeds_pipe() {
        let mut state = ShellState::new();
        state
            .aliases
            .insert("zz".to_string(), "echo hi".to_string());
        let out = capture(&mut state, "alias zz | tr a-z A-Z");
        assert_eq!(out, "ECHO HI\n");
    }

    #[test]
    fn test_alias_rewrite_through_evaluator() {
        let mut state = ShellState::new();
        state
            .aliases
            .insert("greet".to_string(), "echo hello".to_string());
        assert_eq!(capture(&mut state, "greet world"), "hello world\n");
    }

    #[test]
    fn test_command_not_found_sets_status() {
        let mut state = ShellState::new();
        capture(&mut state, "definitely-not-a-command-zzz");
        assert_eq!(state.last_status, 1);
    }

    #[test]
    fn test_lex_error_keeps_last_status() {
        let mut state = ShellState::new();
        state.last_status = 42;
        let status = run_line(&mut state, "echo \"oops");
        assert_eq!(status, 42);
        assert_eq!(state.last_status, 42);
    }

    #[test]
    fn test_comment_and_empty_lines_are_noops() {
        let mut state = ShellState::new();
        state.last_status = 7;
        assert_eq!(run_line(&mut state, "# a comment"), 7);
        assert_eq!(run_line(&mut state, "   "), 7);
    }

    #[test]
    fn test_exit_stops_the_walk() {
        let mut state = ShellState::new();
        let out = capture(&mut state, "echo one ; exit 3 ; echo two");
        assert_eq!(out, "one\n");
        assert_eq!(state.exit_request, Some(3));
    }

    #[test]
    fn test_with_scope_spans_one_command() {
        let mut state = ShellState::new();
        std::env::remove_var("WSH_TEST_EVAL_W");

        run_line(&mut state, "with WSH_TEST_EVAL_W temp");
        assert_eq!(std::env::var("WSH_TEST_EVAL_W").unwrap(), "temp");

        // The next command closes the scope regardless of its status.
        run_line(&mut state, "equals a b");
        assert!(std::env::var("WSH_TEST_EVAL_W").is_err());
        assert!(state.with_scopes.is_empty());
    }

    #[test]
    fn test_without_closes_all_scopes() {
        let mut state = ShellState::new();
        run_line(&mut state, "with WSH_TEST_EVAL_W1 a ; with WSH_TEST_EVAL_W2 b ; without");
        assert!(state.with_scopes.is_empty());
        assert!(std::env::var("WSH_TEST_EVAL_W1").is_err());
        assert!(std::env::var("WSH_TEST_EVAL_W2").is_err());
    }

    #[test]
    fn test_background_launch_status() {
        let mut state = ShellState::new();
        run_line(&mut state, "sleep 0 &");
        assert_eq!(state.last_status, 0);
        let pid = state.last_background_pid.unwrap();
        // Collect the child so it does not linger as a zombie.
        let _ = nix::sys::wait::waitpid(Pid::from_raw(pid), None);
    }

    #[test]
    fn test_empty_expansion_is_skipped() {
        let mut state = ShellState::new();
        state.last_status = 5;
        run_line(&mut state, "{WSH_TEST_EVAL_UNSET}");
        assert_eq!(state.last_status, 5);
    }
}
