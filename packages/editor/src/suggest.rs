//! Completion context for a cursor position.

use serde::{Deserialize, Serialize};
use tracing::trace;
use windlass_parser::parser::{Parser, DEFAULT_SEPARATOR};
use windlass_parser::scanner::in_comment;

use crate::locate::{locate, Target};

/// What the completion provider needs to know at a cursor position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub target: Option<Target>,
    /// Names of the variants already applied on the path to the cursor, for
    /// filtering them out of the candidate list.
    pub variants: Vec<String>,
    /// Whether the cursor sits inside a comment. Computed by an independent
    /// scan: the structural parse stops at the cursor, but comment state has
    /// to be known regardless.
    pub in_comment: bool,
}

pub fn suggest(text: &str, position: usize) -> Suggestion {
    suggest_in(&Parser::new(DEFAULT_SEPARATOR), text, position)
}

pub fn suggest_in(parser: &Parser, text: &str, position: usize) -> Suggestion {
    let program = parser.parse_until(text, position);
    let location = locate(&program, position);
    let suggestion = Suggestion {
        target: location.target,
        variants: location
            .variants
            .iter()
            .map(|v| v.name().to_string())
            .collect(),
        in_comment: in_comment(text, position),
    };
    trace!(position, variants = ?suggestion.variants, "suggest context");
    suggestion
}
