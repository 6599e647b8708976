// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

/// One atom of a key path: a named map field or a numeric array position.
///
/// `Index` keeps the literal digit text (e.g. `"007"`) so that
/// [`join_path`] re-serializes exactly what [`split_path`] consumed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Segment {
    Key(String),
    Index(String),
}

impl Segment {
    /// The segment's text without any path punctuation.
    pub fn text(&self) -> &str {
        match self {
            Segment::Key(s) => s,
            Segment::Index(s) => s,
        }
    }
}

/// Error raised while tokenizing a key path.
///
/// Positions are byte offsets into the offending path string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty key")]
    EmptyKey,
    #[error("space at position {0}")]
    Space(usize),
    #[error("empty key segment at position {0}")]
    EmptySegment(usize),
    #[error("key ends with '.'")]
    TrailingDot,
    #[error("'.' not allowed inside brackets at position {0}")]
    DotInsideBrackets(usize),
    #[error("'[' not allowed inside brackets at position {0}")]
    NestedBracket(usize),
    #[error("'[' cannot directly follow '.' at position {0}")]
    BracketAfterDot(usize),
    #[error("']' without matching '[' at position {0}")]
    UnmatchedBracket(usize),
    #[error("index must be an unsigned integer at position {0}")]
    InvalidIndex(usize),
    #[error("unexpected character '{ch}' after ']' at position {pos}")]
    AfterBracket { ch: char, pos: usize },
    #[error("unclosed '[' at position {0}")]
    UnclosedBracket(usize),
}

/// Tokenize a key path such as `db.hosts[0].name` into segments.
///
/// Key text between delimiters must be non-empty; index text between
/// brackets must be a base-10 unsigned integer that fits in `u64`. Spaces
/// are never allowed. The accepted strings round-trip exactly through
/// [`join_path`].
pub fn split_path(path: &str) -> Result<Vec<Segment>, PathError> {
    if path.is_empty() {
        return Err(PathError::EmptyKey);
    }

    let mut segments = vec![];
    let mut seg_start = 0usize; // start of the current key text
    let mut idx_start = 0usize; // start of the current index text
    let mut open_pos = 0usize; // position of the unmatched '['
    let mut in_brackets = false;
    let mut prev: Option<char> = None;

    for (pos, ch) in path.char_indices() {
        match ch {
            ' ' => return Err(PathError::Space(pos)),
            '.' if in_brackets => return Err(PathError::DotInsideBrackets(pos)),
            '.' => {
                // "a[0].b": the dot only separates; no key text precedes it.
                if prev != Some(']') {
                    let text = &path[seg_start..pos];
                    if text.is_empty() {
                        return Err(PathError::EmptySegment(pos));
                    }
                    segments.push(Segment::Key(text.to_string()));
                }
                seg_start = pos + 1;
            }
            '[' if in_brackets => return Err(PathError::NestedBracket(pos)),
            '[' => {
                if prev == Some('.') {
                    return Err(PathError::BracketAfterDot(pos));
                }
                // Empty text is fine at the start of the path or after ']'.
                if pos > seg_start {
                    segments.push(Segment::Key(path[seg_start..pos].to_string()));
                }
                in_brackets = true;
                open_pos = pos;
                idx_start = pos + 1;
            }
            ']' => {
                if !in_brackets {
                    return Err(PathError::UnmatchedBracket(pos));
                }
                let text = &path[idx_start..pos];
                if text.is_empty()
                    || !text.bytes().all(|b| b.is_ascii_digit())
                    || text.parse::<u64>().is_err()
                {
                    return Err(PathError::InvalidIndex(idx_start));
                }
                segments.push(Segment::Index(text.to_string()));
                in_brackets = false;
                seg_start = pos + 1;
            }
            _ if in_brackets => {
                // Validated as index text when the bracket closes.
            }
            _ => {
                if prev == Some(']') {
                    return Err(PathError::AfterBracket { ch, pos });
                }
            }
        }
        prev = Some(ch);
    }

    if in_brackets {
        return Err(PathError::UnclosedBracket(open_pos));
    }

    let tail = &path[seg_start..];
    if !tail.is_empty() {
        segments.push(Segment::Key(tail.to_string()));
    } else if prev != Some(']') {
        return Err(PathError::TrailingDot);
    }

    Ok(segments)
}

/// Serialize segments back into a key path.
///
/// A key segment is preceded by `.` unless it is first; an index segment is
/// wrapped in `[...]` with no separator. Left inverse of [`split_path`]:
/// `join_path(&split_path(s)?) == s` for every accepted `s`.
pub fn join_path(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        match seg {
            Segment::Key(k) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(k);
            }
            Segment::Index(n) => {
                out.push('[');
                out.push_str(n);
                out.push(']');
            }
        }
    }
    out
}
