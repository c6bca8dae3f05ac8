//! Variable Substitution
//!
//! Replaces `{NAME}` with the environment value of `NAME`, or the empty
//! string when unset.

use regex_lite::{Captures, Regex};

lazy_static::lazy_static! {
    static ref VARIABLE: Regex = Regex::new(r"\{(\w+)\}").unwrap();
}

/// Substitute every `{NAME}` occurrence in `input`.
pub fn substitute_variables(input: &str) -> String {
    VARIABLE
        .replace_all(input, |caps: &Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_set_variable() {
        std::env::set_var("WSH_TEST_VAR_SUB", "foo");
        assert_eq!(substitute_variables("{WSH_TEST_VAR_SUB}bar"), "foobar");
        std::env::remove_var("WSH_TEST_VAR_SUB");
    }

    #[test]
    fn test_unset_variable_becomes_empty() {
        assert_eq!(substitute_variables("a{WSH_TEST_VAR_UNSET}b"), "ab");
    }

    #[test]
    fn test_multiple_occurrences() {
        std::env::set_var("WSH_TEST_VAR_MULTI", "x");
        assert_eq!(
            substitute_variables("{WSH_TEST_VAR_MULTI}-{WSH_TEST_VAR_MULTI}"),
            "x-x"
        );
        std::env::remove_var("WSH_TEST_VAR_MULTI");
    }

    #[test]
    fn test_no_braces_untouched() {
        assert_eq!(substitute_variables("plain text"), "plain text");
        assert_eq!(substitute_variables("{not a name}"), "{not a name}");
    }
}
