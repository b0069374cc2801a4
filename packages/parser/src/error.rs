use thiserror::Error;

/// Errors produced by the theme-path grammar.
///
/// The expression parser never errors: malformed class strings degrade to a
/// partial tree with `closed = false` nodes. Theme paths are the one grammar
/// strict enough to report syntax errors; parsing stops at the first one and
/// whatever path was assembled so far is still returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThemePathError {
    #[error("Unexpected character '{found}' at {offset}: expected '.' or '['")]
    UnexpectedCharacter { offset: usize, found: char },

    #[error("Expected a key after '{delimiter}' at {offset}")]
    MissingKey { offset: usize, delimiter: char },

    #[error("Unclosed '[' at {offset}")]
    UnclosedBracket { offset: usize },
}
