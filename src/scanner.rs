//! Scanner
//!
//! This module implements the complete tokenization pipeline for the
//! template format.
//!
//! Structure:
//!     The scanner is a hand-written three-state machine (`Text` ->
//! `TagSniff` -> `InTag` -> `Text`) walking the source with an explicit
//! cursor. A derive-time lexer cannot express this grammar because the tag
//! delimiters can be redefined from inside the template itself.
//!
//! The pipeline consists of:
//! 1. Delimiter management (default `{{`/`}}`, per-scan override, in-template
//!    `{{=<% %>=}}` redefinition) ./scanner/delimiters.rs
//! 2. The state machine walking the source ./scanner/scanner_impl.rs
//! 3. Token building once a tag closes (trim, parameter split, `ngettext`
//!    reclassification) ./scanner/builder.rs
//! 4. Standalone-line whitespace filtering at every newline and at end of
//!    input ./scanner/standalone.rs
//!
//! Standalone Lines
//!
//!     A tag that is the only non-whitespace content on its source line is
//!     "standalone": the surrounding whitespace and the line's newline are
//!     trimmed from the output, and for partial tags the leading whitespace
//!     is kept on the token as `indent` so a renderer can re-indent the
//!     inlined template. This filtering happens once per completed line,
//!     which keeps the state machine itself line-agnostic.
//!
//!     The rationale for this approach is:
//!     - The state machine only ever appends tokens; trimming is a
//!       post-processing step over the tokens of one line.
//!     - The filter produces a dense stream (real removal, no tombstones),
//!       so downstream code must not assume pre-filter positions survive.

pub mod builder;
pub mod cursor;
pub mod delimiters;
pub mod interface;
pub mod scanner_impl;
pub mod standalone;
pub mod testing;
pub mod tokens;

pub use interface::{ScanError, Source, TemplateSource};
pub use scanner_impl::{Scanner, ScannerOptions};
pub use tokens::{Token, TokenKind};

/// Scan a template with the default options and delimiters.
///
/// Convenience wrapper over [Scanner] for the common case. Returns the full
/// token stream, or the first recoverable scan error (unterminated tag,
/// malformed delimiter change).
pub fn scan(source: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(ScannerOptions::default()).scan(Source::Raw(source))
}
