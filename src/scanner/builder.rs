//! Token building.
//!
//! Once a tag closes, the buffered body plus the detected kind become a
//! [Token]: the body is trimmed, parameter-accepting kinds split it at the
//! first whitespace run into `(name, args)`, and with the
//! pluralized-translation extension enabled a plain interpolation whose body
//! starts with the `ngettext` keyword is reclassified, which lets the plural
//! form be written without a dedicated sigil.

use crate::scanner::delimiters::Delimiters;
use crate::scanner::tokens::{Token, TokenKind};

/// The keyword that reclassifies a plain interpolation to the plural kind.
const NGETTEXT_KEYWORD: &str = "ngettext";

/// Build a tag token from the raw buffered body.
///
/// `index` must already follow the source-index rule for `kind`
/// (section-close tags point at their own opening delimiter, everything else
/// just past the closing delimiter).
pub fn build_tag(
    kind: TokenKind,
    raw_body: &str,
    delimiters: &Delimiters,
    index: usize,
    plural_tags: bool,
) -> Token {
    let mut kind = kind;
    let mut body = raw_body.trim();

    if plural_tags && kind == TokenKind::Interpolation {
        if let Some(rest) = body.strip_prefix(NGETTEXT_KEYWORD) {
            if rest.starts_with(char::is_whitespace) {
                kind = TokenKind::PluralGettext;
                body = rest.trim_start();
            }
        }
    }

    if kind.accepts_args() {
        let (name, args) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (body, ""),
        };
        Token::tag(kind, name, delimiters, index).with_args(args)
    } else {
        Token::tag(kind, body, delimiters, index)
    }
}
