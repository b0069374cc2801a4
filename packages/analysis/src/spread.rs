//! Flattening traversal.
//!
//! Turns the parsed tree into a linear list of resolvable items, each
//! snapshotting the variant chain and important flag accumulated on the way
//! down. Structurally invalid nodes go to side lists instead of producing
//! items; those side lists are the feed for diagnostics.

use serde::{Deserialize, Serialize};
use windlass_parser::ast::*;
use windlass_parser::parser::Parser;

/// A leaf a consumer can resolve to CSS: a class name, a shorthand CSS
/// declaration, or an arbitrary-value classname.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SpreadTarget {
    Class(ClassName),
    Declaration(CssDeclaration),
    Arbitrary(ArbitraryClassname),
}

impl SpreadTarget {
    pub fn span(&self) -> Span {
        match self {
            SpreadTarget::Class(n) => n.span,
            SpreadTarget::Declaration(n) => n.span,
            SpreadTarget::Arbitrary(n) => n.span,
        }
    }
}

/// One flattened declaration with its fully resolved context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadItem {
    pub target: SpreadTarget,
    /// Variant chain in left-to-right source order.
    pub variants: Vec<Variant>,
    /// The item's own flag ORed with every enclosing group's.
    pub important: bool,
    /// Source text of the target with any `!` markers stripped; this is what
    /// gets handed to the CSS resolver.
    pub text: String,
}

impl SpreadItem {
    pub fn span(&self) -> Span {
        self.target.span()
    }

    pub fn variant_names(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.name()).collect()
    }
}

/// Output of the flattening pass. `items` are in source pre-order; the side
/// lists collect nodes that cannot become items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub items: Vec<SpreadItem>,
    pub empty_groups: Vec<Group>,
    pub empty_variants: Vec<VariantSpan>,
    pub unclosed: Vec<Expression>,
}

impl Spread {
    pub fn class_names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }
}

#[derive(Clone)]
struct Context {
    variants: Vec<Variant>,
    important: bool,
}

/// Parse `text` with the default separator and flatten it.
pub fn spread(text: &str) -> Spread {
    spread_with(&Parser::new(windlass_parser::parser::DEFAULT_SEPARATOR), text)
}

/// Parse `text` with a configured parser and flatten it.
pub fn spread_with(parser: &Parser, text: &str) -> Spread {
    let program = parser.parse(text);
    spread_program(text, &program)
}

/// Flatten an already-parsed program.
pub fn spread_program(text: &str, program: &Program) -> Spread {
    let mut out = Spread::default();
    let context = Context {
        variants: Vec::new(),
        important: false,
    };
    for expr in &program.expressions {
        walk(text, expr, &context, &mut out);
    }
    out
}

fn walk(text: &str, expr: &Expression, context: &Context, out: &mut Spread) {
    match expr {
        Expression::VariantSpan(span) => {
            if !expr.closed() {
                out.unclosed.push(expr.clone());
                return;
            }
            let Some(child) = &span.child else {
                out.empty_variants.push(span.clone());
                return;
            };
            let mut next = context.clone();
            next.variants.push(span.variant.clone());
            walk(text, child, &next, out);
        }
        Expression::Group(g) => {
            if !g.closed {
                out.unclosed.push(expr.clone());
                return;
            }
            if g.expressions.is_empty() {
                out.empty_groups.push(g.clone());
                return;
            }
            let mut next = context.clone();
            next.important |= g.important;
            for child in &g.expressions {
                walk(text, child, &next, out);
            }
        }
        Expression::ClassName(c) => out.items.push(SpreadItem {
            target: SpreadTarget::Class(c.clone()),
            variants: context.variants.clone(),
            important: context.important || c.important,
            text: c.value.clone(),
        }),
        Expression::CssDeclaration(d) => {
            if !d.closed {
                out.unclosed.push(expr.clone());
                return;
            }
            out.items.push(SpreadItem {
                target: SpreadTarget::Declaration(d.clone()),
                variants: context.variants.clone(),
                important: context.important || d.important,
                text: trim_bangs(d.span.slice(text)),
            });
        }
        Expression::ArbitraryClassname(a) => {
            if !a.closed {
                out.unclosed.push(expr.clone());
                return;
            }
            out.items.push(SpreadItem {
                target: SpreadTarget::Arbitrary(a.clone()),
                variants: context.variants.clone(),
                important: context.important || a.important,
                text: trim_bangs(a.span.slice(text)),
            });
        }
    }
}

fn trim_bangs(text: &str) -> String {
    text.trim_start_matches('!')
        .trim_end_matches('!')
        .to_string()
}
