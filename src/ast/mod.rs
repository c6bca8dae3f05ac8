//! Abstract syntax tree for parsed command lines.

pub mod types;

pub use types::{Command, CommandList, Word, WordPart};
