//! Test factories for building expected token streams succinctly.
//!
//! Token equality covers every field (frozen delimiters included), so
//! hand-writing struct literals in tests drowns the interesting parts. The
//! factories here default to the `{{`/`}}` pair; `*_delims` variants take an
//! explicit pair for scans that redefine delimiters.

use crate::scanner::delimiters::Delimiters;
use crate::scanner::tokens::{Token, TokenKind};

fn delims(open: &str, close: &str) -> Delimiters {
    Delimiters {
        open: open.to_string(),
        close: close.to_string(),
    }
}

/// A plain-text token with the default delimiter pair.
pub fn text(value: &str, index: usize) -> Token {
    Token::text(value, &Delimiters::default(), index)
}

/// The synthetic one-newline text token a non-standalone line ends with.
pub fn newline(index: usize) -> Token {
    text("\n", index)
}

/// A tag token with the default delimiter pair.
pub fn tag(kind: TokenKind, name: &str, index: usize) -> Token {
    let token = Token::tag(kind, name, &Delimiters::default(), index);
    if kind.accepts_args() {
        token.with_args("")
    } else {
        token
    }
}

/// A tag token with an explicit delimiter pair.
pub fn tag_delims(kind: TokenKind, name: &str, index: usize, open: &str, close: &str) -> Token {
    let token = Token::tag(kind, name, &delims(open, close), index);
    if kind.accepts_args() {
        token.with_args("")
    } else {
        token
    }
}

/// A plain-text token with an explicit delimiter pair.
pub fn text_delims(value: &str, index: usize, open: &str, close: &str) -> Token {
    Token::text(value, &delims(open, close), index)
}
