//! Command Parser
//!
//! Assembles lexer tokens into a command list. Word tokens accumulate
//! into the current command; operator tokens set the matching terminator
//! flag and close it. A trailing virtual `;` closes the final command,
//! so `echo hi` and `echo hi ;` parse identically. Empty commands
//! (consecutive separators) are dropped.

use crate::ast::types::{Command, CommandList};
use crate::parser::lexer::{tokenize, TokenType};
use crate::parser::types::{ParseException, MAX_INPUT_SIZE};
use crate::parser::word_parser::parse_word;

/// Parse an input line into a command list. `depth` counts backtick
/// nesting; callers outside the parser use [`crate::parser::parse`].
pub fn parse_list(input: &str, depth: usize) -> Result<CommandList, ParseException> {
    if input.len() > MAX_INPUT_SIZE {
        return Err(ParseException::new("input line too long", 0));
    }

    let tokens = tokenize(input).map_err(|e| ParseException::new(e.message, e.column))?;

    let mut list = CommandList::new();
    let mut current = Command::new();

    for token in tokens {
        match token.token_type {
            TokenType::Word => {
                current.words.push(parse_word(&token.value, depth)?);
            }
            TokenType::Semi => close_command(&mut list, &mut current),
            TokenType::AndAnd => {
                current.and_next = true;
                close_command(&mut list, &mut current);
            }
            TokenType::OrOr => {
                current.or_next = true;
                close_command(&mut list, &mut current);
            }
            TokenType::Pipe => {
                current.pipe_next = true;
                close_command(&mut list, &mut current);
            }
            TokenType::Amp => {
                current.background = true;
                close_command(&mut list, &mut current);
            }
        }
    }

    // Trailing virtual `;`
    close_command(&mut list, &mut current);

    Ok(list)
}

fn close_command(list: &mut CommandList, current: &mut Command) {
    if current.words.is_empty() {
        // Separator with nothing before it; discard its flags too.
        *current = Command::new();
    } else {
        list.commands.push(std::mem::take(current));
    }
}
