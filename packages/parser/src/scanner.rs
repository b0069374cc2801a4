//! Character-level scanning primitives.
//!
//! The class-string micro-language cannot be tokenized up front: brackets,
//! quotes, comments and CSS `url()` literals all nest and have to be told
//! apart character by character. These helpers do that one job and nothing
//! else; the parser drives them.

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Normal,
    /// Inside a quoted string; the byte is the quote that opened it.
    Quoted(u8),
    LineComment,
    BlockComment,
    /// Inside the argument of a CSS `url(` literal.
    Url,
}

pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// True when `bytes[i]` is the `(` of a CSS `url(` literal, i.e. the literal
/// sequence `url(` not immediately preceded by a word character.
fn starts_url(bytes: &[u8], i: usize, low: usize) -> bool {
    if i < low + 3 || bytes[i] != b'(' {
        return false;
    }
    if &bytes[i - 3..i] != b"url" {
        return false;
    }
    i == low + 3 || !is_word(bytes[i - 4])
}

/// Find the closing bracket matching the opener at `start`, scanning
/// `text[start..end]`.
///
/// Brackets are ignored inside quoted strings (no escape handling; the first
/// quote kind seen closes it), inside `//` line comments, inside `/* */`
/// block comments, and inside a `url(...)` argument, whose own `)` never
/// terminates the outer scan. Returns `None` when the text ends first or a
/// stray closer underflows the depth counter.
pub fn find_right_bracket(
    text: &str,
    start: usize,
    end: usize,
    brackets: (u8, u8),
) -> Option<usize> {
    let bytes = text.as_bytes();
    let (open, close) = brackets;
    let mut depth = 0usize;
    let mut state = State::Normal;
    let mut i = start;

    while i < end {
        let b = bytes[i];
        match state {
            State::Normal => {
                if i > start && starts_url(bytes, i, start) {
                    state = State::Url;
                } else if b == open {
                    depth += 1;
                } else if b == close {
                    if depth == 0 {
                        return None;
                    }
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                } else if b == b'"' || b == b'\'' {
                    state = State::Quoted(b);
                } else if b == b'/' && i + 1 < end && bytes[i + 1] == b'/' {
                    state = State::LineComment;
                    i += 1;
                } else if b == b'/' && i + 1 < end && bytes[i + 1] == b'*' {
                    state = State::BlockComment;
                    i += 1;
                }
            }
            State::Quoted(quote) => {
                if b == quote {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if b == b'*' && i + 1 < end && bytes[i + 1] == b'/' {
                    state = State::Normal;
                    i += 1;
                }
            }
            State::Url => {
                if b == b')' {
                    state = State::Normal;
                }
            }
        }
        i += 1;
    }

    None
}

/// Whether `position` falls inside a `//` or `/* */` comment.
///
/// An independent scan over the whole input. The structural parse can stop
/// early at a cursor offset, but comment state has to be known regardless, so
/// this runs its own quote/comment state machine from the top.
pub fn in_comment(text: &str, position: usize) -> bool {
    let bytes = text.as_bytes();
    let end = position.min(bytes.len());
    let mut state = State::Normal;
    let mut i = 0;

    while i < end {
        let b = bytes[i];
        match state {
            State::Normal => {
                if b == b'"' || b == b'\'' {
                    state = State::Quoted(b);
                } else if b == b'/' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                    state = State::LineComment;
                    i += 1;
                } else if b == b'/' && i + 1 < bytes.len() && bytes[i + 1] == b'*' {
                    state = State::BlockComment;
                    i += 1;
                }
            }
            State::Quoted(quote) => {
                if b == quote {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if b == b'*' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                    state = State::Normal;
                    i += 1;
                }
            }
            // url() state is only entered by bracket scans
            State::Url => {}
        }
        i += 1;
    }

    matches!(state, State::LineComment | State::BlockComment)
}
