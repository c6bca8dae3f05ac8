//! Alias Expansion
//!
//! Rewrites a command whose head names an alias. The alias value is
//! re-parsed as a command list and spliced in place of the original
//! command; the original's trailing words land on the last command of
//! the expansion, which also inherits the original's terminator flags.
//!
//! The evaluator drives this to a fixed point with a seen-set and a
//! depth limit, so alias cycles (`alias a b ; alias b a`) terminate.
//! Lookup fires only for a bare literal head word; quoted or computed
//! heads are never alias-expanded.

use std::collections::HashSet;

use crate::ast::types::Command;
use crate::interpreter::types::ShellState;
use crate::parser::{parse, ParseException};

/// Rewrite depth limit; also bounds cycle detection.
pub const MAX_ALIAS_DEPTH: usize = 16;

/// Replace `commands[idx]` with the parsed expansion of `alias_value`.
pub fn splice_alias(
    commands: &mut Vec<Command>,
    idx: usize,
    alias_value: &str,
) -> Result<(), ParseException> {
    let mut expansion = parse(alias_value)?.commands;
    let original = commands.remove(idx);

    if let Some(last) = expansion.last_mut() {
        last.words.extend(original.words.into_iter().skip(1));
        last.and_next = original.and_next;
        last.or_next = original.or_next;
        last.pipe_next = original.pipe_next;
        last.background = original.background;
    }

    commands.splice(idx..idx, expansion);
    Ok(())
}

/// Rewrite the head of `commands[idx]` until it no longer names an
/// alias. Returns whether any rewrite happened.
pub fn resolve_alias_head(
    state: &ShellState,
    commands: &mut Vec<Command>,
    idx: usize,
) -> Result<bool, ParseException> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut rewritten = false;

    while seen.len() < MAX_ALIAS_DEPTH {
        let head = match commands
            .get(idx)
            .and_then(|c| c.words.first())
            .and_then(|w| w.as_literal())
        {
            Some(head) => head.to_string(),
            None => break,
        };

        if seen.contains(&head) {
            break;
        }

        let value = match state.aliases.get(&head) {
            Some(value) => value.clone(),
            None => break,
        };

        seen.insert(head);
        splice_alias(commands, idx, &value)?;
        rewritten = true;
    }

    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn commands_of(input: &str) -> Vec<Command> {
        parse(input).unwrap().commands
    }

    fn argv_literals(cmd: &Command) -> Vec<&str> {
        cmd.words.iter().filter_map(|w| w.as_literal()).collect()
    }

    #[test]
    fn test_splice_simple_alias() {
        let mut commands = commands_of("ll /tmp");
        splice_alias(&mut commands, 0, "ls -l").unwrap();

        assert_eq!(commands.len(), 1);
        assert_eq!(argv_literals(&commands[0]), vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn test_splice_preserves_terminator_flags() {
        let mut commands = commands_of("ll && echo ok");
        splice_alias(&mut commands, 0, "ls -l").unwrap();

        assert_eq!(commands.len(), 2);
        assert!(commands[0].and_next);
        assert_eq!(argv_literals(&commands[0]), vec!["ls", "-l"]);
    }

    #[test]
    fn test_splice_multi_command_alias() {
        // Trailing args go to the last command of the expansion.
        let mut commands = commands_of("go src");
        splice_alias(&mut commands, 0, "echo changing ; cd").unwrap();

        assert_eq!(commands.len(), 2);
        assert_eq!(argv_literals(&commands[0]), vec!["echo", "changing"]);
        assert_eq!(argv_literals(&commands[1]), vec!["cd", "src"]);
    }

    #[test]
    fn test_resolve_to_fixed_point() {
        let mut state = ShellState::new();
        state.aliases.insert("a".to_string(), "b".to_string());
        state.aliases.insert("b".to_string(), "echo done".to_string());

        let mut commands = commands_of("a now");
        let rewritten = resolve_alias_head(&state, &mut commands, 0).unwrap();

        assert!(rewritten);
        assert_eq!(argv_literals(&commands[0]), vec!["echo", "done", "now"]);
    }

    #[test]
    fn test_resolve_breaks_cycles() {
        let mut state = ShellState::new();
        state.aliases.insert("a".to_string(), "b".to_string());
        state.aliases.insert("b".to_string(), "a".to_string());

        let mut commands = commands_of("a");
        resolve_alias_head(&state, &mut commands, 0).unwrap();

        // Cycle detected; the head settles on one of the two names.
        assert_eq!(commands.len(), 1);
        let head = commands[0].words[0].as_literal().unwrap();
        assert!(head == "a" || head == "b");
    }

    #[test]
    fn test_quoted_head_is_not_expanded() {
        let mut state = ShellState::new();
        state.aliases.insert("ll".to_string(), "ls -l".to_string());

        let mut commands = commands_of("'ll' /tmp");
        let rewritten = resolve_alias_head(&state, &mut commands, 0).unwrap();

        assert!(!rewritten);
    }

    #[test]
    fn test_no_alias_no_rewrite() {
        let state = ShellState::new();
        let mut commands = commands_of("ls -l");
        assert!(!resolve_alias_head(&state, &mut commands, 0).unwrap());
        assert_eq!(argv_literals(&commands[0]), vec!["ls", "-l"]);
    }
}
