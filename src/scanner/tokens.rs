//! Core token types and the sigil tables shared across the scanner and tooling.
//!
//!     A token is either a run of plain text or a single tag. The scanner
//!     opts for handling more complexity here (parameter splitting, frozen
//!     delimiters, partial indentation) in order to keep the downstream
//!     parser very simple.
//!
//! Sigils
//!
//!     The single character right after the open delimiter selects the tag
//!     kind. The base table covers the mustache surface; enabling the
//!     pluralized-translation extension at construction registers two extra
//!     sigils. The tables are immutable and chosen once per scanner, never
//!     mutated per scan.
//!
//! Source Index
//!
//!     Every token records a byte offset into the source. For section-close
//!     tags this is the offset of the close tag's own opening delimiter, so
//!     the parser knows where the enclosing section's content ends. For all
//!     other tokens it is the offset immediately after the token (including
//!     the absorbed third brace of a `{{{name}}}` tag).

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::scanner::delimiters::Delimiters;

/// The kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// A run of plain template text (including synthetic newline tokens).
    Text,
    /// `{{name}}` - escaped interpolation, the sigil-less default.
    Interpolation,
    /// `{{{name}}}` - unescaped interpolation, brace spelling.
    Triple,
    /// `{{&name}}` - unescaped interpolation, ampersand spelling.
    Ampersand,
    /// `{{#name}}` - section open; accepts parameters.
    SectionOpen,
    /// `{{^name}}` - inverted section open.
    InvertedOpen,
    /// `{{/name}}` - section close.
    SectionClose,
    /// `{{!text}}` - comment.
    Comment,
    /// `{{>name}}` - partial; accepts parameters.
    Partial,
    /// `{{<name}}` - partial, include spelling; accepts parameters.
    Include,
    /// `{{=<% %>=}}` - delimiter change; handled inline, never emitted.
    SetDelimiters,
    /// `{{% one other}}` / `{{ngettext one other}}` - pluralized
    /// translation; only recognized when the extension is enabled.
    PluralGettext,
}

impl TokenKind {
    /// Every kind except plain text.
    pub fn is_tag(self) -> bool {
        self != TokenKind::Text
    }

    /// Kinds that produce output when rendered. A line carrying one of
    /// these is never treated as standalone.
    pub fn is_interpolating(self) -> bool {
        matches!(
            self,
            TokenKind::Interpolation
                | TokenKind::Triple
                | TokenKind::Ampersand
                | TokenKind::PluralGettext
        )
    }

    /// Kinds whose tag body splits into a name and raw parameter text.
    pub fn accepts_args(self) -> bool {
        matches!(
            self,
            TokenKind::SectionOpen
                | TokenKind::Partial
                | TokenKind::Include
                | TokenKind::PluralGettext
        )
    }

    /// Both spellings of a partial reference.
    pub fn is_partial(self) -> bool {
        matches!(self, TokenKind::Partial | TokenKind::Include)
    }
}

/// Base sigil table: the character following the open delimiter.
pub static BASE_SIGILS: Lazy<HashMap<char, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ('#', TokenKind::SectionOpen),
        ('^', TokenKind::InvertedOpen),
        ('/', TokenKind::SectionClose),
        ('!', TokenKind::Comment),
        ('>', TokenKind::Partial),
        ('<', TokenKind::Include),
        ('{', TokenKind::Triple),
        ('&', TokenKind::Ampersand),
        ('=', TokenKind::SetDelimiters),
    ])
});

/// Extra sigils registered when the pluralized-translation extension is
/// enabled at construction. Both spellings select the same kind.
pub static PLURAL_SIGILS: Lazy<HashMap<char, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ('%', TokenKind::PluralGettext),
        ('@', TokenKind::PluralGettext),
    ])
});

/// One scanned token.
///
/// `open`/`close` freeze the delimiter pair that was active when the token
/// was produced; delimiters can change mid-scan, so each token carries its
/// own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Trimmed tag body for tag tokens; empty for text tokens.
    pub name: String,
    /// Raw text for text tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub open: String,
    pub close: String,
    /// Byte offset into the source; see the module docs for the exact rule.
    pub index: usize,
    /// Leading whitespace of a standalone partial line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<String>,
    /// Raw parameter text for kinds that accept parameters; `Some("")` when
    /// the tag body has no whitespace run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}

impl Token {
    /// Make a plain-text token.
    pub fn text(value: impl Into<String>, delimiters: &Delimiters, index: usize) -> Self {
        Token {
            kind: TokenKind::Text,
            name: String::new(),
            value: Some(value.into()),
            open: delimiters.open.clone(),
            close: delimiters.close.clone(),
            index,
            indent: None,
            args: None,
        }
    }

    /// Make a tag token with no parameters or indentation attached.
    pub fn tag(
        kind: TokenKind,
        name: impl Into<String>,
        delimiters: &Delimiters,
        index: usize,
    ) -> Self {
        Token {
            kind,
            name: name.into(),
            value: None,
            open: delimiters.open.clone(),
            close: delimiters.close.clone(),
            index,
            indent: None,
            args: None,
        }
    }

    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = Some(args.into());
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    /// True for a text token whose every character is whitespace.
    pub fn is_whitespace_text(&self) -> bool {
        self.kind == TokenKind::Text
            && self
                .value
                .as_deref()
                .is_some_and(|v| v.chars().all(char::is_whitespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_sigils_cover_the_mustache_surface() {
        assert_eq!(BASE_SIGILS.get(&'#'), Some(&TokenKind::SectionOpen));
        assert_eq!(BASE_SIGILS.get(&'^'), Some(&TokenKind::InvertedOpen));
        assert_eq!(BASE_SIGILS.get(&'/'), Some(&TokenKind::SectionClose));
        assert_eq!(BASE_SIGILS.get(&'!'), Some(&TokenKind::Comment));
        assert_eq!(BASE_SIGILS.get(&'>'), Some(&TokenKind::Partial));
        assert_eq!(BASE_SIGILS.get(&'<'), Some(&TokenKind::Include));
        assert_eq!(BASE_SIGILS.get(&'{'), Some(&TokenKind::Triple));
        assert_eq!(BASE_SIGILS.get(&'&'), Some(&TokenKind::Ampersand));
        assert_eq!(BASE_SIGILS.get(&'='), Some(&TokenKind::SetDelimiters));
        assert_eq!(BASE_SIGILS.len(), 9);
    }

    #[test]
    fn test_plural_sigils_are_separate_from_the_base_table() {
        assert_eq!(PLURAL_SIGILS.get(&'%'), Some(&TokenKind::PluralGettext));
        assert_eq!(PLURAL_SIGILS.get(&'@'), Some(&TokenKind::PluralGettext));
        assert!(BASE_SIGILS.get(&'%').is_none());
        assert!(BASE_SIGILS.get(&'@').is_none());
    }

    #[test]
    fn test_interpolating_kinds() {
        assert!(TokenKind::Interpolation.is_interpolating());
        assert!(TokenKind::Triple.is_interpolating());
        assert!(TokenKind::Ampersand.is_interpolating());
        assert!(TokenKind::PluralGettext.is_interpolating());

        assert!(!TokenKind::Text.is_interpolating());
        assert!(!TokenKind::SectionOpen.is_interpolating());
        assert!(!TokenKind::InvertedOpen.is_interpolating());
        assert!(!TokenKind::SectionClose.is_interpolating());
        assert!(!TokenKind::Comment.is_interpolating());
        assert!(!TokenKind::Partial.is_interpolating());
        assert!(!TokenKind::Include.is_interpolating());
    }

    #[test]
    fn test_kinds_accepting_parameters() {
        assert!(TokenKind::SectionOpen.accepts_args());
        assert!(TokenKind::Partial.accepts_args());
        assert!(TokenKind::Include.accepts_args());
        assert!(TokenKind::PluralGettext.accepts_args());

        assert!(!TokenKind::Interpolation.accepts_args());
        assert!(!TokenKind::InvertedOpen.accepts_args());
        assert!(!TokenKind::SectionClose.accepts_args());
    }

    #[test]
    fn test_whitespace_text_detection() {
        let delims = Delimiters::default();
        assert!(Token::text("  \t ", &delims, 0).is_whitespace_text());
        assert!(Token::text("", &delims, 0).is_whitespace_text());
        assert!(!Token::text("  x ", &delims, 0).is_whitespace_text());
        assert!(!Token::tag(TokenKind::Comment, "x", &delims, 0).is_whitespace_text());
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&TokenKind::SectionOpen).unwrap();
        assert_eq!(json, "\"section-open\"");
    }
}
