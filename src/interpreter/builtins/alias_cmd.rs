//! alias / unalias - Alias management
//!
//! `alias` with no arguments lists the table, with one argument prints
//! one definition, with two defines (or deletes, when the value is
//! empty).

use crate::interpreter::types::{ExecResult, ShellState};

pub fn handle_alias(state: &mut ShellState, args: &[String]) -> ExecResult {
    match args.len() {
        0 => {
            let mut out = String::from("Aliases:\n");
            let mut names: Vec<&String> = state.aliases.keys().collect();
            names.sort();
            for name in names {
                out.push_str(&format!("  {} -> {}\n", name, state.aliases[name]));
            }
            ExecResult::output(out)
        }
        1 => match state.aliases.get(&args[0]) {
            Some(value) => ExecResult::output(format!("{}\n", value)),
            None => ExecResult::failure(format!("wsh: alias: {}: not found\n", args[0])),
        },
        _ => {
            if args[1].is_empty() {
                state.aliases.remove(&args[0]);
            } else {
                state.aliases.insert(args[0].clone(), args[1].clone());
            }
            ExecResult::ok()
        }
    }
}

pub fn handle_unalias(state: &mut ShellState, args: &[String]) -> ExecResult {
    let Some(name) = args.first() else {
        return ExecResult::failure("wsh: unalias: expected NAME\n");
    };
    state.aliases.remove(name);
    ExecResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_define_print_and_delete() {
        let mut state = ShellState::new();

        handle_alias(&mut state, &args(&["ll", "ls -l"]));
        assert_eq!(state.aliases.get("ll").unwrap(), "ls -l");

        let result = handle_alias(&mut state, &args(&["ll"]));
        assert_eq!(result.stdout, "ls -l\n");

        // Empty value deletes.
        handle_alias(&mut state, &args(&["ll", ""]));
        assert!(state.aliases.is_empty());
    }

    #[test]
    fn test_list_is_sorted() {
        let mut state = ShellState::new();
        handle_alias(&mut state, &args(&["zz", "z"]));
        handle_alias(&mut state, &args(&["aa", "a"]));

        let result = handle_alias(&mut state, &[]);
        let aa = result.stdout.find("aa ->").unwrap();
        let zz = result.stdout.find("zz ->").unwrap();
        assert!(aa < zz);
    }

    #[test]
    fn test_print_unknown_alias_fails() {
        let mut state = ShellState::new();
        assert_eq!(handle_alias(&mut state, &args(&["nope"])).exit_code, 1);
    }

    #[test]
    fn test_unalias() {
        let mut state = ShellState::new();
        handle_alias(&mut state, &args(&["ll", "ls -l"]));
        handle_unalias(&mut state, &args(&["ll"]));
        assert!(state.aliases.is_empty());

        assert_eq!(handle_unalias(&mut state, &[]).exit_code, 1);
    }
}
