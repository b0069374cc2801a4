//! Recursive-descent parser for the utility-class micro-language.
//!
//! One compiled alternation regex picks the next construct at the scan
//! position; explicit bracket scanning (see [`crate::scanner`]) handles
//! everything the regex cannot. Malformed input never fails: unterminated
//! brackets produce nodes with `closed = false` and ranges that run to the
//! end of the scanned region, so editing tools can recover mid-edit.

use crate::ast::*;
use crate::scanner::{find_right_bracket, is_space};
use regex::Regex;

pub const DEFAULT_SEPARATOR: &str = ":";

/// Parser configured for one variant separator.
///
/// The dispatch pattern is compiled once per instance and kept as a field
/// rather than in module-level state, so separate configurations stay
/// reentrant.
pub struct Parser {
    separator: String,
    pattern: Regex,
}

/// One step of the scan loop.
enum Step {
    /// A node was produced; resume at the offset.
    Node(Expression, usize),
    /// Comment or unmatchable text; resume at the offset.
    Skip(usize),
    /// Nothing left to match in the region.
    End,
}

impl Parser {
    pub fn new(separator: &str) -> Self {
        let sep = regex::escape(separator);
        let pattern = format!(
            "(?P<line>//[^\\n]*)\
            |(?P<block>/\\*)\
            |(?P<variant>[\\w-]+{sep})\
            |(?P<prefix>!?[\\w-]+/?\\[)\
            |(?P<token>!?[-\\w./%#@]+!?)\
            |(?P<avariant>!?\\[)\
            |(?P<group>!?\\()"
        );
        Self {
            separator: separator.to_string(),
            // the pattern is built from escaped parts and cannot be invalid
            pattern: Regex::new(&pattern).expect("dispatch pattern compiles"),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Parse the whole text.
    pub fn parse(&self, text: &str) -> Program {
        self.parse_inner(text, 0, text.len(), None)
    }

    /// Parse `text[start..end]`. Spans stay relative to the full text.
    pub fn parse_range(&self, text: &str, start: usize, end: usize) -> Program {
        self.parse_inner(text, start, end, None)
    }

    /// Parse the whole text, but stop once the scan position moves past
    /// `break_at`, even mid-expression. This is how position-bounded
    /// consumers (completion, hover) avoid paying for text after the cursor.
    pub fn parse_until(&self, text: &str, break_at: usize) -> Program {
        self.parse_inner(text, 0, text.len(), Some(break_at))
    }

    fn parse_inner(
        &self,
        text: &str,
        start: usize,
        end: usize,
        break_at: Option<usize>,
    ) -> Program {
        let end = end.min(text.len());
        Program {
            span: Span::new(start, end),
            expressions: self.parse_expressions(text, start, end, break_at),
        }
    }

    fn parse_expressions(
        &self,
        text: &str,
        start: usize,
        end: usize,
        break_at: Option<usize>,
    ) -> Vec<Expression> {
        let mut expressions = Vec::new();
        let mut pos = start;

        while pos < end {
            if break_at.is_some_and(|limit| pos > limit) {
                break;
            }
            match self.step(text, pos, end, break_at) {
                Step::Node(expr, next) => {
                    expressions.push(expr);
                    pos = advanced(text, pos, next);
                }
                Step::Skip(next) => {
                    pos = advanced(text, pos, next);
                }
                Step::End => break,
            }
        }

        expressions
    }

    /// Match the next construct at or after `pos` within `text[..end]`.
    fn step(&self, text: &str, pos: usize, end: usize, break_at: Option<usize>) -> Step {
        let caps = match self.pattern.captures_at(&text[..end], pos) {
            Some(caps) => caps,
            None => return Step::End,
        };

        if let Some(m) = caps.name("line") {
            return Step::Skip(m.end());
        }
        if let Some(m) = caps.name("block") {
            let close = text[m.end()..end]
                .find("*/")
                .map(|i| m.end() + i + 2)
                .unwrap_or(end);
            return Step::Skip(close);
        }
        if let Some(m) = caps.name("variant") {
            return self.parse_simple_variant(text, m.start(), m.end(), end, break_at);
        }
        if let Some(m) = caps.name("prefix") {
            return self.parse_bracket_classname(text, m.start(), m.end(), end);
        }
        if let Some(m) = caps.name("token") {
            return Step::Node(plain_token(text, m.start(), m.end()), m.end());
        }
        if let Some(m) = caps.name("avariant") {
            return self.parse_arbitrary_variant(text, m.start(), m.end(), end, break_at);
        }
        if let Some(m) = caps.name("group") {
            return self.parse_group(text, m.start(), m.end(), end, break_at);
        }

        Step::End
    }

    /// `word<sep>` followed by at most one adjacent child expression.
    fn parse_simple_variant(
        &self,
        text: &str,
        start: usize,
        sep_end: usize,
        end: usize,
        break_at: Option<usize>,
    ) -> Step {
        let id_end = sep_end - self.separator.len();
        let variant = Variant::Simple(SimpleVariant {
            span: Span::new(start, sep_end),
            id: Identifier {
                span: Span::new(start, id_end),
                value: text[start..id_end].to_string(),
            },
        });
        self.variant_span(text, start, sep_end, variant, end, break_at)
    }

    /// `[selector]<sep>`. Requires the separator right after the closing
    /// `]`, otherwise the whole bracketed text is reinterpreted as a plain
    /// token.
    fn parse_arbitrary_variant(
        &self,
        text: &str,
        start: usize,
        match_end: usize,
        end: usize,
        break_at: Option<usize>,
    ) -> Step {
        let bytes = text.as_bytes();
        let bang = bytes[start] == b'!';
        let lbracket = match_end - 1;

        let Some(rbracket) = find_right_bracket(text, lbracket, end, (b'[', b']')) else {
            let variant = Variant::Arbitrary(ArbitraryVariant {
                span: Span::new(start, end),
                closed: false,
                selector: CssSelector {
                    span: Span::new(lbracket + 1, end),
                    value: text[lbracket + 1..end].to_string(),
                },
            });
            let span = Span::new(start, end);
            return Step::Node(
                Expression::VariantSpan(VariantSpan {
                    span,
                    variant,
                    child: None,
                }),
                end,
            );
        };

        let after = rbracket + 1;
        if text[after..end].starts_with(&self.separator) {
            let sep_end = after + self.separator.len();
            let variant = Variant::Arbitrary(ArbitraryVariant {
                span: Span::new(start, sep_end),
                closed: true,
                selector: CssSelector {
                    span: Span::new(lbracket + 1, rbracket),
                    value: text[lbracket + 1..rbracket].to_string(),
                },
            });
            return self.variant_span(text, start, sep_end, variant, end, break_at);
        }

        // no separator: plain token like `[--spacing:4px]`
        let mut node_end = after;
        let mut important = bang;
        if node_end < end && bytes[node_end] == b'!' {
            important = true;
            node_end += 1;
        }
        Step::Node(
            Expression::ClassName(ClassName {
                span: Span::new(start, node_end),
                value: text[start + bang as usize..after].to_string(),
                important,
            }),
            node_end,
        )
    }

    fn variant_span(
        &self,
        text: &str,
        start: usize,
        sep_end: usize,
        variant: Variant,
        end: usize,
        break_at: Option<usize>,
    ) -> Step {
        let (child, next) = self.parse_child(text, sep_end, end, break_at);
        let span = Span::new(start, child.as_ref().map_or(sep_end, |c| c.span().end));
        Step::Node(
            Expression::VariantSpan(VariantSpan {
                span,
                variant,
                child,
            }),
            next,
        )
    }

    /// Parse the single expression a variant applies to. The child must be
    /// adjacent: whitespace, end of region, a comment, or the break offset
    /// leave the variant empty, which is not an error.
    fn parse_child(
        &self,
        text: &str,
        pos: usize,
        end: usize,
        break_at: Option<usize>,
    ) -> (Option<Box<Expression>>, usize) {
        if pos >= end || break_at.is_some_and(|limit| pos > limit) {
            return (None, pos);
        }
        let rest = &text[pos..end];
        if is_space(rest.as_bytes()[0]) || rest.starts_with("//") || rest.starts_with("/*") {
            return (None, pos);
        }
        match self.step(text, pos, end, break_at) {
            Step::Node(expr, next) if expr.span().start == pos => (Some(Box::new(expr)), next),
            _ => (None, pos),
        }
    }

    /// `ident[value]`, `ident-[value]` or `ident/[opacity]`; the character
    /// immediately before the bracket decides which form this is.
    fn parse_bracket_classname(
        &self,
        text: &str,
        start: usize,
        match_end: usize,
        end: usize,
    ) -> Step {
        let bytes = text.as_bytes();
        let bang = bytes[start] == b'!';
        let name_start = start + bang as usize;
        let lbracket = match_end - 1;
        let before = bytes[lbracket - 1];
        let rbracket = find_right_bracket(text, lbracket, end, (b'[', b']'));

        match before {
            // arbitrary value: `text-[14px]`, optionally with opacity suffix
            b'-' => {
                let prop = identifier(text, name_start, lbracket - 1);
                match rbracket {
                    Some(rb) => {
                        let expr = css_expression(text, lbracket + 1, rb);
                        let (opacity, after, closed) = self.parse_opacity(text, rb + 1, end);
                        let (important, node_end) = trailing_bang(bytes, bang, after, end);
                        Step::Node(
                            Expression::ArbitraryClassname(ArbitraryClassname {
                                span: Span::new(start, node_end),
                                closed,
                                important,
                                prop,
                                expr: Some(expr),
                                opacity,
                            }),
                            node_end,
                        )
                    }
                    None => Step::Node(
                        Expression::ArbitraryClassname(ArbitraryClassname {
                            span: Span::new(start, end),
                            closed: false,
                            important: bang,
                            prop,
                            expr: Some(css_expression(text, lbracket + 1, end)),
                            opacity: None,
                        }),
                        end,
                    ),
                }
            }
            // opacity-suffixed color with no arbitrary value: `text-red-500/[.5]`
            b'/' => {
                let prop = identifier(text, name_start, lbracket - 1);
                match rbracket {
                    Some(rb) => {
                        let opacity = OpacitySuffix::Bracketed(css_expression(text, lbracket + 1, rb));
                        let (important, node_end) = trailing_bang(bytes, bang, rb + 1, end);
                        Step::Node(
                            Expression::ArbitraryClassname(ArbitraryClassname {
                                span: Span::new(start, node_end),
                                closed: true,
                                important,
                                prop,
                                expr: None,
                                opacity: Some(opacity),
                            }),
                            node_end,
                        )
                    }
                    None => Step::Node(
                        Expression::ArbitraryClassname(ArbitraryClassname {
                            span: Span::new(start, end),
                            closed: false,
                            important: bang,
                            prop,
                            expr: None,
                            opacity: Some(OpacitySuffix::Bracketed(css_expression(
                                text,
                                lbracket + 1,
                                end,
                            ))),
                        }),
                        end,
                    ),
                }
            }
            // shorthand CSS declaration: `color[red]`
            _ => {
                let prop = identifier(text, name_start, lbracket);
                match rbracket {
                    Some(rb) => {
                        let expr = css_expression(text, lbracket + 1, rb);
                        let (important, node_end) = trailing_bang(bytes, bang, rb + 1, end);
                        Step::Node(
                            Expression::CssDeclaration(CssDeclaration {
                                span: Span::new(start, node_end),
                                closed: true,
                                important,
                                prop,
                                expr,
                            }),
                            node_end,
                        )
                    }
                    None => Step::Node(
                        Expression::CssDeclaration(CssDeclaration {
                            span: Span::new(start, end),
                            closed: false,
                            important: bang,
                            prop,
                            expr: css_expression(text, lbracket + 1, end),
                        }),
                        end,
                    ),
                }
            }
        }
    }

    /// `/[value]` or `/value` immediately after a closed bracket. The third
    /// return value is false when the opacity bracket itself ran off the end.
    fn parse_opacity(
        &self,
        text: &str,
        pos: usize,
        end: usize,
    ) -> (Option<OpacitySuffix>, usize, bool) {
        let bytes = text.as_bytes();
        if pos >= end || bytes[pos] != b'/' {
            return (None, pos, true);
        }
        let after = pos + 1;
        if after < end && bytes[after] == b'[' {
            return match find_right_bracket(text, after, end, (b'[', b']')) {
                Some(rb) => (
                    Some(OpacitySuffix::Bracketed(css_expression(text, after + 1, rb))),
                    rb + 1,
                    true,
                ),
                None => (
                    Some(OpacitySuffix::Bracketed(css_expression(text, after + 1, end))),
                    end,
                    false,
                ),
            };
        }
        let mut i = after;
        while i < end && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'.') {
            i += 1;
        }
        if i == after {
            return (None, pos, true);
        }
        (
            Some(OpacitySuffix::Literal(identifier(text, after, i))),
            i,
            true,
        )
    }

    /// `(` or `!(`: a list of expressions up to the matching `)`.
    fn parse_group(
        &self,
        text: &str,
        start: usize,
        match_end: usize,
        end: usize,
        break_at: Option<usize>,
    ) -> Step {
        let bytes = text.as_bytes();
        let bang = bytes[start] == b'!';
        let lparen = match_end - 1;

        match find_right_bracket(text, lparen, end, (b'(', b')')) {
            Some(rparen) => {
                let expressions = self.parse_expressions(text, lparen + 1, rparen, break_at);
                let (important, node_end) = trailing_bang(bytes, bang, rparen + 1, end);
                Step::Node(
                    Expression::Group(Group {
                        span: Span::new(start, node_end),
                        closed: true,
                        important,
                        expressions,
                    }),
                    node_end,
                )
            }
            None => Step::Node(
                Expression::Group(Group {
                    span: Span::new(start, end),
                    closed: false,
                    important: bang,
                    expressions: self.parse_expressions(text, lparen + 1, end, break_at),
                }),
                end,
            ),
        }
    }
}

fn identifier(text: &str, start: usize, end: usize) -> Identifier {
    Identifier {
        span: Span::new(start, end),
        value: text[start..end].to_string(),
    }
}

fn css_expression(text: &str, start: usize, end: usize) -> CssExpression {
    CssExpression {
        span: Span::new(start, end),
        value: text[start..end].to_string(),
    }
}

fn plain_token(text: &str, start: usize, end: usize) -> Expression {
    let token = &text[start..end];
    let leading = token.starts_with('!');
    let trailing = token.len() > leading as usize && token.ends_with('!');
    Expression::ClassName(ClassName {
        span: Span::new(start, end),
        value: text[start + leading as usize..end - trailing as usize].to_string(),
        important: leading || trailing,
    })
}

fn trailing_bang(bytes: &[u8], bang: bool, pos: usize, end: usize) -> (bool, usize) {
    if pos < end && bytes[pos] == b'!' {
        (true, pos + 1)
    } else {
        (bang, pos)
    }
}

/// Guard against a scan position that fails to advance. Release builds force
/// a one-character step so the loop always terminates.
fn advanced(text: &str, pos: usize, next: usize) -> usize {
    debug_assert!(next > pos, "scan position failed to advance at {pos}");
    if next > pos {
        next
    } else {
        pos + text[pos..].chars().next().map_or(1, char::len_utf8)
    }
}

/// Parse with the default `:` separator.
pub fn parse(text: &str) -> Program {
    Parser::new(DEFAULT_SEPARATOR).parse(text)
}
