//! Prompt Handling
//!
//! The prompt template comes from `WSH_PROMPT` (default `"$ "`) and is
//! rendered through variable substitution and the escape processor each
//! time it is shown.

use crate::interpreter::expansion::escapes::process_escapes;
use crate::interpreter::expansion::variable::substitute_variables;
use crate::interpreter::types::ShellState;
use crate::shell::DEFAULT_PROMPT;

/// Read the raw prompt template from the environment.
pub fn load_prompt() -> String {
    std::env::var("WSH_PROMPT").unwrap_or_else(|_| DEFAULT_PROMPT.to_string())
}

/// Render the shell prompt.
pub fn render_prompt(state: &ShellState) -> String {
    process_escapes(state, &substitute_variables(&state.prompt))
}
