//! Parser for the utility-class string micro-language
//! (`hover:(bg-red-500 text-[14px])!`, `sm:bg-[url(...)]`,
//! `group-hover:text-red-500/[.5]`).
//!
//! The parser never fails on malformed input: it degrades to a best-effort
//! partial tree with `closed = false` markers so editor tooling keeps working
//! mid-edit. All offsets are byte offsets into the input.

pub mod ast;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod theme;


pub use ast::{
    ArbitraryClassname, ArbitraryVariant, ClassName, CssDeclaration, CssExpression, CssSelector,
    Expression, Group, Identifier, OpacitySuffix, Program, SimpleVariant, Span, Variant,
    VariantSpan,
};
pub use error::ThemePathError;
pub use parser::{parse, Parser, DEFAULT_SEPARATOR};
pub use scanner::{find_right_bracket, in_comment};
pub use theme::{
    parse_theme_path, parse_theme_path_range, try_opacity_value, OpacitySplit, SegmentKind,
    ThemePath, ThemePathSegment,
};
