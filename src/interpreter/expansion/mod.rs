//! Word Expansion
//!
//! Turns parsed words into argument strings. Per fragment:
//! - literal and double-quoted text: `{NAME}` substitution, tilde
//!   expansion, then escape processing
//! - single-quoted text: verbatim
//! - sub-commands: evaluated with captured output spliced in, minus at
//!   most one trailing newline

pub mod escapes;
pub mod prompt;
pub mod tilde;
pub mod variable;

use crate::ast::types::{Word, WordPart};
use crate::interpreter::evaluator;
use crate::interpreter::types::ShellState;

use escapes::process_escapes;
use tilde::expand_tilde;
use variable::substitute_variables;

/// Expand unquoted or double-quoted fragment text.
pub fn expand_text(state: &ShellState, text: &str) -> String {
    process_escapes(state, &expand_tilde(&substitute_variables(text)))
}

/// Expand one word to its final string value.
pub fn expand_word(state: &mut ShellState, word: &Word) -> String {
    let mut out = String::new();

    for part in &word.parts {
        match part {
            WordPart::Literal(text) | WordPart::DoubleQuoted(text) => {
                out.push_str(&expand_text(state, text));
            }
            WordPart::SingleQuoted(text) => out.push_str(text),
            WordPart::SubCommand(list) => {
                let captured = evaluator::run_captured(state, list);
                out.push_str(captured.strip_suffix('\n').unwrap_or(&captured));
            }
        }
    }

    out
}

/// Expand a command's words into its argv.
pub fn expand_words(state: &mut ShellState, words: &[Word]) -> Vec<String> {
    words.iter().map(|w| expand_word(state, w)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::Word;

    fn word_of(parts: Vec<WordPart>) -> Word {
        Word { parts }
    }

    #[test]
    fn test_fragments_concatenate() {
        let mut state = ShellState::new();
        let word = word_of(vec![
            WordPart::Literal("a".to_string()),
            WordPart::SingleQuoted("b".to_string()),
            WordPart::DoubleQuoted("c".to_string()),
        ]);
        assert_eq!(expand_word(&mut state, &word), "abc");
    }

    #[test]
    fn test_single_quoted_is_verbatim() {
        let mut state = ShellState::new();
        std::env::set_var("WSH_TEST_EXP_SQ", "value");
        let word = word_of(vec![WordPart::SingleQuoted(
            "{WSH_TEST_EXP_SQ}~\\n".to_string(),
        )]);
        assert_eq!(expand_word(&mut state, &word), "{WSH_TEST_EXP_SQ}~\\n");
        std::env::remove_var("WSH_TEST_EXP_SQ");
    }

    #[test]
    fn test_double_quoted_expands() {
        let mut state = ShellState::new();
        std::env::set_var("WSH_TEST_EXP_DQ", "foo");
        let word = word_of(vec![WordPart::DoubleQuoted(
            "{WSH_TEST_EXP_DQ}\\nbar".to_string(),
        )]);
        assert_eq!(expand_word(&mut state, &word), "foo\nbar");
        std::env::remove_var("WSH_TEST_EXP_DQ");
    }

    #[test]
    fn test_literal_expands_tilde() {
        let mut state = ShellState::new();
        let word = word_of(vec![WordPart::Literal("~/x".to_string())]);
        let expanded = expand_word(&mut state, &word);
        assert!(expanded.ends_with("/x"));
        assert!(!expanded.contains('~'));
    }
}
