//! Standalone-line whitespace filtering.
//!
//! Runs once per newline consumed in text state, and once unconditionally at
//! end of input. A line is "whitespace-only" when every tag token on it is
//! of a non-interpolating kind and every text token on it is pure
//! whitespace. Such a line with at least one tag is standalone: its text
//! tokens are removed outright and no newline token is emitted, so the line
//! leaves no trace in the rendered output. Before removal, a text token
//! directly preceding a partial tag donates its content to that token's
//! `indent`, which is how a renderer learns how far to indent an inlined
//! partial.
//!
//! Removal is genuine: the stream stays dense and positions before the
//! filter pass do not survive it.

use crate::scanner::delimiters::Delimiters;
use crate::scanner::tokens::{Token, TokenKind};

/// Close out the line that started at stream position `line_start`.
///
/// `newline_index` is the source offset just past the consumed newline (or
/// the end of input for the final call). Returns the new line marker.
pub fn finish_line(
    tokens: &mut Vec<Token>,
    line_start: usize,
    newline_index: usize,
    delimiters: &Delimiters,
    at_eof: bool,
) -> usize {
    let line = &tokens[line_start..];
    let has_tag = line.iter().any(|t| t.kind.is_tag());
    let whitespace_only = line
        .iter()
        .all(|t| t.is_whitespace_text() || (t.kind.is_tag() && !t.kind.is_interpolating()));

    if has_tag && whitespace_only {
        // Leading whitespace becomes the indentation of an adjacent partial.
        for i in line_start..tokens.len().saturating_sub(1) {
            if tokens[i].kind == TokenKind::Text && tokens[i + 1].kind.is_partial() {
                tokens[i + 1].indent = tokens[i].value.clone();
            }
        }
        let kept: Vec<Token> = tokens
            .drain(line_start..)
            .filter(|t| t.kind != TokenKind::Text)
            .collect();
        tokens.extend(kept);
    } else if !at_eof {
        tokens.push(Token::text("\n", delimiters, newline_index));
    }

    tokens.len()
}
