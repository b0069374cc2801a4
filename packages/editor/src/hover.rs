//! Tooltip context for a cursor position.

use serde::{Deserialize, Serialize};
use tracing::trace;
use windlass_parser::parser::{Parser, DEFAULT_SEPARATOR};

use crate::locate::{locate, Target};

/// Which half of a shorthand CSS declaration the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CssPart {
    Property,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    pub target: Target,
    /// The textual value under the cursor: the class name, the declaration
    /// text, or the variant name.
    pub value: String,
    /// Variant names resolved on the path to the target, in source order.
    pub variants: Vec<String>,
    /// The target's own flag ORed with every enclosing group's.
    pub important: bool,
    /// Set when the target is a shorthand CSS declaration and the cursor
    /// sits in its property or value sub-range.
    pub css_part: Option<CssPart>,
}

pub fn hover(text: &str, position: usize) -> Option<Hover> {
    hover_in(&Parser::new(DEFAULT_SEPARATOR), text, position)
}

pub fn hover_in(parser: &Parser, text: &str, position: usize) -> Option<Hover> {
    let program = parser.parse_until(text, position);
    let location = locate(&program, position);
    let target = location.target?;

    let value = match &target {
        Target::Class(c) => c.value.clone(),
        Target::Declaration(d) => d.span.slice(text).to_string(),
        Target::Arbitrary(a) => a.span.slice(text).to_string(),
        Target::Variant(v) => v.name().to_string(),
    };
    let css_part = match &target {
        Target::Declaration(d) => {
            if d.prop.span.touches(position) {
                Some(CssPart::Property)
            } else if d.expr.span.touches(position) {
                Some(CssPart::Value)
            } else {
                None
            }
        }
        _ => None,
    };

    trace!(position, value = %value, "hover context");
    Some(Hover {
        target,
        value,
        variants: location
            .variants
            .iter()
            .map(|v| v.name().to_string())
            .collect(),
        important: location.important,
        css_part,
    })
}
