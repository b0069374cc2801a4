//! Theme-path mini-grammar.
//!
//! Parses dotted/bracketed accessors into the design-token configuration
//! object (`colors.red.500`, `colors[red-500]`) and hosts the opacity-suffix
//! split heuristic. A path like `colors.foo-5/10` is ambiguous between "key
//! containing a literal slash" and "key plus opacity modifier": resolution
//! must first try the path literally against the theme object and only fall
//! back to [`try_opacity_value`] when that lookup fails.

use crate::ast::Span;
use crate::error::ThemePathError;
use crate::scanner::find_right_bracket;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Bare leading key: `colors` in `colors.red`.
    Root,
    /// `.key` access.
    Dot,
    /// `[key]` access.
    Bracket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePathSegment {
    pub span: Span,
    pub kind: SegmentKind,
    pub value: String,
}

/// A parsed theme path plus any syntax errors hit along the way. Parsing
/// stops at the first error; the segments assembled up to that point are
/// kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemePath {
    pub span: Span,
    pub segments: Vec<ThemePathSegment>,
    pub errors: Vec<ThemePathError>,
}

/// Parse a theme path out of `text[start..end]`.
///
/// A single layer of `'` or `"` quotes around the whole input is stripped
/// before parsing.
pub fn parse_theme_path_range(text: &str, start: usize, end: usize) -> ThemePath {
    let end = end.min(text.len());
    let bytes = text.as_bytes();

    // unquote one layer around the whole input
    let (start, end) = if end - start >= 2
        && (bytes[start] == b'\'' || bytes[start] == b'"')
        && bytes[end - 1] == bytes[start]
    {
        (start + 1, end - 1)
    } else {
        (start, end)
    };

    let mut segments = Vec::new();
    let mut errors = Vec::new();
    let mut pos = start;

    // bare leading key
    let root_end = key_end(bytes, pos, end);
    if root_end > pos {
        segments.push(segment(text, pos, root_end, SegmentKind::Root));
        pos = root_end;
    }

    while pos < end {
        match bytes[pos] {
            b'.' => {
                let next = key_end(bytes, pos + 1, end);
                if next == pos + 1 {
                    errors.push(ThemePathError::MissingKey {
                        offset: pos,
                        delimiter: '.',
                    });
                    break;
                }
                segments.push(segment(text, pos + 1, next, SegmentKind::Dot));
                pos = next;
            }
            b'[' => match find_right_bracket(text, pos, end, (b'[', b']')) {
                Some(rb) => {
                    if rb == pos + 1 {
                        errors.push(ThemePathError::MissingKey {
                            offset: pos,
                            delimiter: '[',
                        });
                        break;
                    }
                    segments.push(segment(text, pos + 1, rb, SegmentKind::Bracket));
                    pos = rb + 1;
                }
                None => {
                    errors.push(ThemePathError::UnclosedBracket { offset: pos });
                    break;
                }
            },
            other => {
                errors.push(ThemePathError::UnexpectedCharacter {
                    offset: pos,
                    found: other as char,
                });
                break;
            }
        }
    }

    ThemePath {
        span: Span::new(start, end),
        segments,
        errors,
    }
}

/// Parse a whole string as a theme path.
pub fn parse_theme_path(text: &str) -> ThemePath {
    parse_theme_path_range(text, 0, text.len())
}

/// The result of reinterpreting a path's tail as an opacity modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacitySplit {
    pub path: Vec<ThemePathSegment>,
    pub opacity: String,
}

/// Retroactively split a trailing `/fraction` off a parsed path.
///
/// Used when no theme value resolved for the literal path. Walking segments
/// from the end: a segment without a `/` is pure opacity text; the first
/// segment containing a `/` is split at its last slash into the remaining
/// key prefix and the opacity head. An empty prefix moves the boundary to
/// the previous segment instead of keeping an empty key. Returns `None` when
/// no segment contains a slash.
pub fn try_opacity_value(path: &ThemePath) -> Option<OpacitySplit> {
    let segments = &path.segments;
    let mut tail: Vec<&str> = Vec::new();

    for (i, seg) in segments.iter().enumerate().rev() {
        let Some(slash) = seg.value.rfind('/') else {
            tail.push(&seg.value);
            continue;
        };

        let prefix = &seg.value[..slash];
        let mut opacity = seg.value[slash + 1..].to_string();
        for part in tail.iter().rev() {
            opacity.push('.');
            opacity.push_str(part);
        }

        let mut kept: Vec<ThemePathSegment> = segments[..i].to_vec();
        if !prefix.is_empty() {
            kept.push(ThemePathSegment {
                span: Span::new(seg.span.start, seg.span.start + prefix.len()),
                kind: seg.kind,
                value: prefix.to_string(),
            });
        }
        return Some(OpacitySplit {
            path: kept,
            opacity,
        });
    }

    None
}

fn key_end(bytes: &[u8], start: usize, end: usize) -> usize {
    let mut i = start;
    while i < end && bytes[i] != b'.' && bytes[i] != b'[' && bytes[i] != b']' {
        i += 1;
    }
    i
}

fn segment(text: &str, start: usize, end: usize, kind: SegmentKind) -> ThemePathSegment {
    ThemePathSegment {
        span: Span::new(start, end),
        kind,
        value: text[start..end].to_string(),
    }
}
