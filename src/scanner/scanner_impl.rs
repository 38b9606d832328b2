//! The scanner state machine.
//!
//! A three-state machine drives the whole scan:
//!
//! - `Text`: buffer plain characters, handle escaped tag starts, detect the
//!   open delimiter, and close out lines at every newline.
//! - `TagSniff`: step over the open delimiter and classify the tag by its
//!   sigil character. Delimiter changes are handled entirely here and fall
//!   straight back to `Text`.
//! - `InTag`: buffer the tag body until the close delimiter, then hand the
//!   buffer to the token builder.
//!
//! Each `scan` call builds its run state (cursor, buffer, stream, line
//! marker, delimiter pair) from scratch, so a scanner instance can be reused
//! sequentially across templates. Scanning is strictly synchronous and
//! single-threaded; cost is linear in the source length.

use crate::scanner::builder;
use crate::scanner::cursor::Cursor;
use crate::scanner::delimiters::{Delimiters, DEFAULT_CLOSE};
use crate::scanner::interface::{ScanError, Source};
use crate::scanner::standalone;
use crate::scanner::tokens::{Token, TokenKind, BASE_SIGILS, PLURAL_SIGILS};

/// A backslash right before the open delimiter escapes the tag start.
const ESCAPE: char = '\\';

/// Construction-time scanner configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Recognize the pluralized-translation tag kind (the `%`/`@` sigils
    /// and the `ngettext` keyword form).
    pub plural_tags: bool,
}

/// A reusable template scanner.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ScannerOptions,
}

impl Scanner {
    pub fn new(options: ScannerOptions) -> Self {
        Scanner { options }
    }

    /// Scan a template with the default `{{`/`}}` delimiters.
    pub fn scan(&self, input: Source) -> Result<Vec<Token>, ScanError> {
        ScanRun::new(input.resolve(), Delimiters::default(), self.options).run()
    }

    /// Scan a template with an `"OPEN CLOSE"` delimiter override.
    ///
    /// The override applies from the start of the scan; in-template
    /// delimiter-change tags can still replace it later.
    pub fn scan_with_delimiters(
        &self,
        input: Source,
        delimiters: &str,
    ) -> Result<Vec<Token>, ScanError> {
        ScanRun::new(input.resolve(), Delimiters::parse(delimiters)?, self.options).run()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    TagSniff,
    InTag,
}

/// All per-scan state. Dropped at the end of the call, which is what makes
/// sequential reuse of one [Scanner] safe.
struct ScanRun<'a> {
    cursor: Cursor<'a>,
    delimiters: Delimiters,
    options: ScannerOptions,
    state: State,
    tokens: Vec<Token>,
    buffer: String,
    /// Stream position where the current source line started.
    line_start: usize,
    /// Offset of the opening delimiter of the tag being scanned.
    tag_open_index: usize,
    tag_kind: TokenKind,
}

impl<'a> ScanRun<'a> {
    fn new(source: &'a str, delimiters: Delimiters, options: ScannerOptions) -> Self {
        ScanRun {
            cursor: Cursor::new(source),
            delimiters,
            options,
            state: State::Text,
            tokens: Vec::new(),
            buffer: String::new(),
            line_start: 0,
            tag_open_index: 0,
            tag_kind: TokenKind::Interpolation,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ScanError> {
        while !self.cursor.is_at_end() {
            match self.state {
                State::Text => self.text_step(),
                State::TagSniff => self.sniff_step()?,
                State::InTag => self.tag_step(),
            }
        }

        if self.state != State::Text {
            return Err(ScanError::UnterminatedTag {
                at: self.tag_open_index,
            });
        }

        self.flush_text();
        standalone::finish_line(
            &mut self.tokens,
            self.line_start,
            self.cursor.pos(),
            &self.delimiters,
            true,
        );
        Ok(self.tokens)
    }

    fn text_step(&mut self) {
        // An escaped tag start: drop the escape, keep the delimiter
        // character literally. Only the first delimiter character is
        // escaped; scanning continues right after it.
        if self.cursor.peek() == Some(ESCAPE)
            && self.cursor.peek_second() == self.delimiters.open.chars().next()
        {
            self.cursor.bump();
            if let Some(c) = self.cursor.bump() {
                self.buffer.push(c);
            }
            return;
        }

        if self.cursor.matches(&self.delimiters.open) {
            self.flush_text();
            self.tag_open_index = self.cursor.pos();
            self.state = State::TagSniff;
            return;
        }

        if self.cursor.peek() == Some('\n') {
            self.flush_text();
            self.cursor.bump();
            self.line_start = standalone::finish_line(
                &mut self.tokens,
                self.line_start,
                self.cursor.pos(),
                &self.delimiters,
                false,
            );
            return;
        }

        if let Some(c) = self.cursor.bump() {
            self.buffer.push(c);
        }
    }

    fn sniff_step(&mut self) -> Result<(), ScanError> {
        self.cursor.skip(self.delimiters.open.len());

        let kind = match self.cursor.peek().and_then(|c| self.sigil_kind(c)) {
            Some(kind) => {
                self.cursor.bump();
                kind
            }
            // Unrecognized character: the tag content begins immediately.
            None => TokenKind::Interpolation,
        };

        if kind == TokenKind::SetDelimiters {
            self.delimiters.change_from(&mut self.cursor)?;
            self.state = State::Text;
            return Ok(());
        }

        self.tag_kind = kind;
        self.state = State::InTag;
        Ok(())
    }

    fn tag_step(&mut self) {
        if !self.cursor.matches(&self.delimiters.close) {
            if let Some(c) = self.cursor.bump() {
                self.buffer.push(c);
            }
            return;
        }

        let body = std::mem::take(&mut self.buffer);
        self.cursor.skip(self.delimiters.close.len());

        // The sniff step consumed only one of the three opening braces of a
        // `{{{name}}}` tag, so the third closing brace is still pending.
        if self.tag_kind == TokenKind::Triple && self.delimiters.close == DEFAULT_CLOSE {
            self.cursor.bump();
        }

        let index = if self.tag_kind == TokenKind::SectionClose {
            self.tag_open_index
        } else {
            self.cursor.pos()
        };

        let mut token = builder::build_tag(
            self.tag_kind,
            &body,
            &self.delimiters,
            index,
            self.options.plural_tags,
        );

        // With a custom close delimiter the balancing brace of the `{`
        // sigil ends up buffered into the name; trim it if present.
        if self.tag_kind == TokenKind::Triple && self.delimiters.close != DEFAULT_CLOSE {
            if let Some(stripped) = token.name.strip_suffix('}') {
                token.name = stripped.trim_end().to_string();
            }
        }

        self.tokens.push(token);
        self.state = State::Text;
    }

    fn sigil_kind(&self, c: char) -> Option<TokenKind> {
        BASE_SIGILS.get(&c).copied().or_else(|| {
            if self.options.plural_tags {
                PLURAL_SIGILS.get(&c).copied()
            } else {
                None
            }
        })
    }

    fn flush_text(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let value = std::mem::take(&mut self.buffer);
        self.tokens
            .push(Token::text(value, &self.delimiters, self.cursor.pos()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::testing::{tag, tag_delims, text};

    fn scan(source: &str) -> Vec<Token> {
        Scanner::default().scan(Source::Raw(source)).unwrap()
    }

    fn scan_plural(source: &str) -> Vec<Token> {
        Scanner::new(ScannerOptions { plural_tags: true })
            .scan(Source::Raw(source))
            .unwrap()
    }

    #[test]
    fn test_sigils_select_tag_kinds() {
        assert_eq!(scan("{{#a}}")[0].kind, TokenKind::SectionOpen);
        assert_eq!(scan("{{^a}}")[0].kind, TokenKind::InvertedOpen);
        assert_eq!(scan("x{{/a}}")[1].kind, TokenKind::SectionClose);
        assert_eq!(scan("x{{!a}}")[1].kind, TokenKind::Comment);
        assert_eq!(scan("x{{>a}}")[1].kind, TokenKind::Partial);
        assert_eq!(scan("x{{<a}}")[1].kind, TokenKind::Include);
        assert_eq!(scan("x{{&a}}")[1].kind, TokenKind::Ampersand);
        assert_eq!(scan("x{{{a}}}")[1].kind, TokenKind::Triple);
    }

    #[test]
    fn test_unrecognized_sigil_defaults_to_interpolation() {
        let tokens = scan("{{ name }}x");
        assert_eq!(tokens[0], tag(TokenKind::Interpolation, "name", 10));
    }

    #[test]
    fn test_escaped_tag_start_stays_literal() {
        let tokens = scan("\\{{x}}");
        assert_eq!(tokens, vec![text("{{x}}", 6)]);
    }

    #[test]
    fn test_escape_before_other_characters_is_literal() {
        let tokens = scan("a\\b");
        assert_eq!(tokens, vec![text("a\\b", 3)]);
    }

    #[test]
    fn test_triple_brace_absorbs_the_third_brace() {
        let tokens = scan("{{{raw}}}x");
        assert_eq!(
            tokens,
            vec![tag(TokenKind::Triple, "raw", 9), text("x", 10)]
        );
    }

    #[test]
    fn test_triple_with_custom_close_trims_the_balancing_brace() {
        let tokens = scan("{{=<% %>=}}<%{raw}%>");
        assert_eq!(tokens, vec![tag_delims(TokenKind::Triple, "raw", 20, "<%", "%>")]);
    }

    #[test]
    fn test_section_close_index_points_at_its_own_open_delimiter() {
        let tokens = scan("{{#a}}b{{/a}}");
        let close = &tokens[2];
        assert_eq!(close.kind, TokenKind::SectionClose);
        assert_eq!(close.index, 7);
    }

    #[test]
    fn test_delimiter_change_emits_no_token_and_freezes_pairs() {
        let tokens = scan("{{a}}{{=<% %>=}}<%b%>");
        assert_eq!(
            tokens,
            vec![
                tag(TokenKind::Interpolation, "a", 5),
                tag_delims(TokenKind::Interpolation, "b", 21, "<%", "%>"),
            ]
        );
    }

    #[test]
    fn test_escape_follows_the_active_open_delimiter() {
        let tokens = scan("{{=<% %>=}}\\<%x");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].value.as_deref(), Some("<%x"));
        assert_eq!(tokens[0].open, "<%");
        assert_eq!(tokens[0].index, 15);
    }

    #[test]
    fn test_unterminated_tag_is_an_error() {
        let err = Scanner::default().scan(Source::Raw("ab{{x")).unwrap_err();
        assert_eq!(err, ScanError::UnterminatedTag { at: 2 });
    }

    #[test]
    fn test_unterminated_open_delimiter_is_an_error() {
        let err = Scanner::default().scan(Source::Raw("{{")).unwrap_err();
        assert_eq!(err, ScanError::UnterminatedTag { at: 0 });
    }

    #[test]
    fn test_malformed_delimiter_change_is_an_error() {
        let err = Scanner::default()
            .scan(Source::Raw("{{=<% %>"))
            .unwrap_err();
        assert_eq!(err, ScanError::MalformedDelimiterChange { at: 3 });
    }

    #[test]
    fn test_plural_sigils_require_the_extension() {
        let tokens = scan_plural("{{% one other}}");
        assert_eq!(tokens[0].kind, TokenKind::PluralGettext);
        assert_eq!(tokens[0].name, "one");
        assert_eq!(tokens[0].args.as_deref(), Some("other"));

        // Without the extension `%` is ordinary tag content.
        let tokens = scan("{{% one other}}");
        assert_eq!(tokens[0].kind, TokenKind::Interpolation);
        assert_eq!(tokens[0].name, "% one other");
    }

    #[test]
    fn test_at_sigil_spelling() {
        let tokens = scan_plural("{{@ one other}}");
        assert_eq!(tokens[0].kind, TokenKind::PluralGettext);
        assert_eq!(tokens[0].name, "one");
    }

    #[test]
    fn test_ngettext_keyword_form() {
        let tokens = scan_plural("{{ngettext one other}}");
        assert_eq!(tokens[0].kind, TokenKind::PluralGettext);
        assert_eq!(tokens[0].name, "one");
        assert_eq!(tokens[0].args.as_deref(), Some("other"));
    }

    #[test]
    fn test_scan_with_delimiters_override() {
        let scanner = Scanner::default();
        let tokens = scanner
            .scan_with_delimiters(Source::Raw("<%x%>"), "<% %>")
            .unwrap();
        assert_eq!(tokens, vec![tag_delims(TokenKind::Interpolation, "x", 5, "<%", "%>")]);
    }

    #[test]
    fn test_scan_with_invalid_override_is_an_error() {
        let err = Scanner::default()
            .scan_with_delimiters(Source::Raw("x"), "{{")
            .unwrap_err();
        assert!(matches!(err, ScanError::InvalidDelimiters(_)));
    }

    #[test]
    fn test_sequential_reuse_resets_state() {
        let scanner = Scanner::default();
        let first = scanner.scan(Source::Raw("{{=<% %>=}}<%a%>")).unwrap();
        // The delimiter change of the first scan must not leak into the next.
        let second = scanner.scan(Source::Raw("{{b}}")).unwrap();
        assert_eq!(first[0].name, "a");
        assert_eq!(second, vec![tag(TokenKind::Interpolation, "b", 5)]);
    }

    #[test]
    fn test_provider_input() {
        let template = String::from("{{x}}");
        let tokens = Scanner::default()
            .scan(Source::Provider(&template))
            .unwrap();
        assert_eq!(tokens[0].name, "x");
    }
}
