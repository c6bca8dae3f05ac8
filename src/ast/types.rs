//! Command Tree Types
//!
//! The parser produces a tree of these nodes: a command list owns its
//! commands, a command owns its words, and a word is an ordered sequence
//! of fragments. Sub-command fragments embed a nested command list, which
//! makes the tree recursive.

use std::fmt;

/// One fragment of a word.
///
/// Quote characters are stripped by the parser; the variant records which
/// quoting mode the fragment was written in, which decides how it is
/// expanded later:
/// - `Literal`: variable substitution, tilde expansion, escape processing
/// - `SingleQuoted`: verbatim
/// - `DoubleQuoted`: same treatment as `Literal`
/// - `SubCommand`: evaluated with captured output spliced in
#[derive(Debug, Clone, PartialEq)]
pub enum WordPart {
    Literal(String),
    SingleQuoted(String),
    DoubleQuoted(String),
    SubCommand(CommandList),
}

/// A single argument: an ordered fragment sequence.
///
/// The word's final string value is the concatenation of its evaluated
/// fragments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Word {
    pub parts: Vec<WordPart>,
}

impl Word {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// The word's literal text if it consists of exactly one literal
    /// fragment. Alias lookup only fires for such words.
    pub fn as_literal(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [WordPart::Literal(s)] => Some(s),
            _ => None,
        }
    }
}

/// A single command: its words plus the terminator that closed it.
///
/// At most one of `and_next`, `or_next` and `pipe_next` is set;
/// `background` is orthogonal. The first word names the callable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Command {
    pub words: Vec<Word>,
    /// `&&`: run the next command only if this one exits 0
    pub and_next: bool,
    /// `||`: run the next command only if this one exits non-zero
    pub or_next: bool,
    /// `|`: feed this command's stdout+stderr to the next command's stdin
    pub pipe_next: bool,
    /// `&`: launch without waiting
    pub background: bool,
}

impl Command {
    pub fn new() -> Self {
        Self::default()
    }

    fn terminator(&self) -> &'static str {
        if self.and_next {
            "&&"
        } else if self.or_next {
            "||"
        } else if self.pipe_next {
            "|"
        } else if self.background {
            "&"
        } else {
            ";"
        }
    }
}

/// An ordered sequence of commands. The root of parsing; sub-commands
/// nest another list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandList {
    pub commands: Vec<Command>,
}

impl CommandList {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }
}

/// Re-escape a fragment body for single quotes.
fn quote_single(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

impl fmt::Display for WordPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordPart::Literal(s) => write!(f, "{}", s),
            WordPart::SingleQuoted(s) => write!(f, "{}", quote_single(s)),
            WordPart::DoubleQuoted(s) => write!(f, "\"{}\"", s),
            WordPart::SubCommand(list) => write!(f, "`{}`", list),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<String> = self.words.iter().map(|w| w.to_string()).collect();
        write!(f, "{} {}", words.join(" "), self.terminator())
    }
}

impl fmt::Display for CommandList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let commands: Vec<String> = self.commands.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", commands.join(" "))
    }
}
