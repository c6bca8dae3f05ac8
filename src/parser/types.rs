//! Parser Types and Constants
//!
//! Shared types and limits used across parser modules.

use std::fmt;
use thiserror::Error;

// Parser limits to prevent hangs and resource exhaustion
pub const MAX_INPUT_SIZE: usize = 1_000_000; // 1MB max input line
pub const MAX_SUBCOMMAND_DEPTH: usize = 64; // Max backtick nesting

#[derive(Debug, Clone, Error)]
pub struct ParseException {
    pub message: String,
    pub column: usize,
}

impl fmt::Display for ParseException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at column {}: {}", self.column, self.message)
    }
}

impl ParseException {
    pub fn new(message: impl Into<String>, column: usize) -> Self {
        Self {
            message: message.into(),
            column,
        }
    }
}
