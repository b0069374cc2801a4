use serde::{Deserialize, Serialize};

/// Span information for source location tracking.
///
/// Byte offsets into the original text, half-open `[start, end)`. Spans are
/// assigned once at parse time and never recomputed; they are a node's
/// identity for "contains cursor" tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Cursor containment test, inclusive on both endpoints so a cursor
    /// sitting immediately after a token still matches it.
    pub fn touches(&self, position: usize) -> bool {
        position >= self.start && position <= self.end
    }

    /// The text this span covers.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Root node covering one scanned region of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub span: Span,
    pub expressions: Vec<Expression>,
}

/// A leaf text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub span: Span,
    pub value: String,
}

/// Raw CSS value text, parsed further only on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssExpression {
    pub span: Span,
    pub value: String,
}

/// Raw selector text from an arbitrary variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssSelector {
    pub span: Span,
    pub value: String,
}

/// A bare utility token (`bg-red-500`) or an unrecognized token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassName {
    pub span: Span,
    pub value: String,
    /// True when a `!` was attached directly to this token. Importance is
    /// never inherited by the parser; propagation through enclosing groups is
    /// the consumers' job.
    pub important: bool,
}

/// A `word:` prefix variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleVariant {
    pub span: Span,
    pub id: Identifier,
}

/// A `[...]:` prefix variant. `closed = false` means no matching `]` was
/// found; the selector extends to the end of the scanned region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitraryVariant {
    pub span: Span,
    pub closed: bool,
    pub selector: CssSelector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Variant {
    Simple(SimpleVariant),
    Arbitrary(ArbitraryVariant),
}

impl Variant {
    pub fn span(&self) -> Span {
        match self {
            Variant::Simple(v) => v.span,
            Variant::Arbitrary(v) => v.span,
        }
    }

    /// The variant's name without the separator (`hover` for `hover:`) or
    /// bracket delimiters (`&>p` for `[&>p]:`).
    pub fn name(&self) -> &str {
        match self {
            Variant::Simple(v) => &v.id.value,
            Variant::Arbitrary(v) => &v.selector.value,
        }
    }
}

/// A variant applied to the expression that immediately follows it.
/// `child` is absent when nothing followed (the empty-variant case).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSpan {
    pub span: Span,
    pub variant: Variant,
    pub child: Option<Box<Expression>>,
}

/// A parenthesized expression list. `important` is true when a `!` is
/// attached to the group itself; `closed = false` flags an unterminated `(`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub span: Span,
    pub closed: bool,
    pub important: bool,
    pub expressions: Vec<Expression>,
}

/// Shorthand CSS property syntax: `prop[value]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssDeclaration {
    pub span: Span,
    pub closed: bool,
    pub important: bool,
    pub prop: Identifier,
    pub expr: CssExpression,
}

/// Opacity suffix on an arbitrary classname.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OpacitySuffix {
    /// Bracketed form: `text-[red]/[.5]`.
    Bracketed(CssExpression),
    /// Unbracketed form: `text-[red]/50`.
    Literal(Identifier),
}

/// `prop-[value]`, `prop-[value]/opacity` or `prop/[opacity]` forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitraryClassname {
    pub span: Span,
    pub closed: bool,
    pub important: bool,
    pub prop: Identifier,
    pub expr: Option<CssExpression>,
    pub opacity: Option<OpacitySuffix>,
}

/// Expression node (tagged union over everything the parser can produce).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    ClassName(ClassName),
    VariantSpan(VariantSpan),
    Group(Group),
    CssDeclaration(CssDeclaration),
    ArbitraryClassname(ArbitraryClassname),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::ClassName(n) => n.span,
            Expression::VariantSpan(n) => n.span,
            Expression::Group(n) => n.span,
            Expression::CssDeclaration(n) => n.span,
            Expression::ArbitraryClassname(n) => n.span,
        }
    }

    /// The node's own important flag. Variant spans carry none; importance on
    /// their child is the child's own.
    pub fn important(&self) -> bool {
        match self {
            Expression::ClassName(n) => n.important,
            Expression::VariantSpan(_) => false,
            Expression::Group(n) => n.important,
            Expression::CssDeclaration(n) => n.important,
            Expression::ArbitraryClassname(n) => n.important,
        }
    }

    /// Whether the node's brackets were all terminated before the end of the
    /// scanned region. Nodes without brackets are always closed.
    pub fn closed(&self) -> bool {
        match self {
            Expression::ClassName(_) => true,
            Expression::VariantSpan(n) => match &n.variant {
                Variant::Simple(_) => true,
                Variant::Arbitrary(v) => v.closed,
            },
            Expression::Group(n) => n.closed,
            Expression::CssDeclaration(n) => n.closed,
            Expression::ArbitraryClassname(n) => n.closed,
        }
    }
}
