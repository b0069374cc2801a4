//! Shared cursor descent for the position-bounded queries.

use serde::{Deserialize, Serialize};
use windlass_parser::ast::*;

/// The node kinds a descent can stop at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Target {
    Class(ClassName),
    Declaration(CssDeclaration),
    Arbitrary(ArbitraryClassname),
    Variant(Variant),
}

impl Target {
    pub fn span(&self) -> Span {
        match self {
            Target::Class(n) => n.span,
            Target::Declaration(n) => n.span,
            Target::Arbitrary(n) => n.span,
            Target::Variant(v) => v.span(),
        }
    }
}

/// Where the cursor landed, with the context accumulated on the way down.
/// `target` is absent when the cursor sits in structural whitespace (inside a
/// group, after an empty variant); the variant context still applies there.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub target: Option<Target>,
    pub variants: Vec<Variant>,
    pub important: bool,
}

/// Find the node under `position`. Range endpoints are inclusive, so a
/// cursor immediately after a token still matches it.
pub fn locate(program: &Program, position: usize) -> Location {
    let mut variants = Vec::new();
    let mut important = false;
    let target = descend(&program.expressions, position, &mut variants, &mut important);
    Location {
        target,
        variants,
        important,
    }
}

fn descend(
    expressions: &[Expression],
    position: usize,
    variants: &mut Vec<Variant>,
    important: &mut bool,
) -> Option<Target> {
    for expr in expressions {
        if !expr.span().touches(position) {
            continue;
        }
        match expr {
            Expression::ClassName(c) => {
                *important |= c.important;
                return Some(Target::Class(c.clone()));
            }
            Expression::CssDeclaration(d) => {
                *important |= d.important;
                return Some(Target::Declaration(d.clone()));
            }
            Expression::ArbitraryClassname(a) => {
                *important |= a.important;
                return Some(Target::Arbitrary(a.clone()));
            }
            Expression::VariantSpan(v) => {
                // the child wins a shared boundary: a cursor right after the
                // separator belongs to whatever is being typed there
                if let Some(child) = &v.child {
                    if child.span().touches(position) {
                        variants.push(v.variant.clone());
                        return descend(
                            std::slice::from_ref(child.as_ref()),
                            position,
                            variants,
                            important,
                        );
                    }
                }
                if position >= v.variant.span().end {
                    // past the separator with nothing there yet
                    variants.push(v.variant.clone());
                    return None;
                }
                return Some(Target::Variant(v.variant.clone()));
            }
            Expression::Group(g) => {
                *important |= g.important;
                return descend(&g.expressions, position, variants, important);
            }
        }
    }
    None
}
