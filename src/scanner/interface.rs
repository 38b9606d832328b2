//! Scanner input and error interfaces.
//!
//! The scanner accepts either raw text or any provider that can hand over
//! the underlying text. The distinction is an explicit tagged input resolved
//! once at the top of `scan`, not a duck-typed value.

use std::fmt;

/// Anything that can hand the scanner its template text.
pub trait TemplateSource {
    fn template(&self) -> &str;
}

impl TemplateSource for str {
    fn template(&self) -> &str {
        self
    }
}

impl TemplateSource for String {
    fn template(&self) -> &str {
        self
    }
}

/// Input accepted by `scan`: raw text, or a provider to pull it from.
#[derive(Clone, Copy)]
pub enum Source<'a> {
    Raw(&'a str),
    Provider(&'a dyn TemplateSource),
}

impl<'a> Source<'a> {
    /// Resolve the input to the underlying text.
    pub fn resolve(&self) -> &'a str {
        match *self {
            Source::Raw(text) => text,
            Source::Provider(provider) => provider.template(),
        }
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Raw(text)
    }
}

/// Errors that can occur during scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A delimiter override was not two non-empty whitespace-separated parts.
    InvalidDelimiters(String),
    /// A tag was still open at end of input. `at` is the byte offset of the
    /// tag's opening delimiter.
    UnterminatedTag { at: usize },
    /// A `{{=...=}}` block was missing its terminator, missing the closing
    /// delimiter, or did not contain exactly two non-empty parts. `at` is
    /// the byte offset just past the `=` sigil.
    MalformedDelimiterChange { at: usize },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::InvalidDelimiters(spec) => {
                write!(f, "Invalid delimiter specification '{}'", spec)
            }
            ScanError::UnterminatedTag { at } => {
                write!(f, "Unterminated tag starting at byte {}", at)
            }
            ScanError::MalformedDelimiterChange { at } => {
                write!(f, "Malformed delimiter change at byte {}", at)
            }
        }
    }
}

impl std::error::Error for ScanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_source_resolves_to_itself() {
        let source = Source::Raw("{{a}}");
        assert_eq!(source.resolve(), "{{a}}");
    }

    #[test]
    fn test_provider_source_resolves_through_the_trait() {
        let owned = String::from("{{a}}");
        let source = Source::Provider(&owned);
        assert_eq!(source.resolve(), "{{a}}");
    }

    #[test]
    fn test_from_str_builds_raw() {
        let source: Source = "x".into();
        assert_eq!(source.resolve(), "x");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ScanError::UnterminatedTag { at: 3 }.to_string(),
            "Unterminated tag starting at byte 3"
        );
        assert_eq!(
            ScanError::InvalidDelimiters("{{".to_string()).to_string(),
            "Invalid delimiter specification '{{'"
        );
    }
}
