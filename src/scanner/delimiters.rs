//! Delimiter management.
//!
//! The active open/close tag markers default to `{{`/`}}`, can be overridden
//! for a whole scan with a `"OPEN CLOSE"` specification, and can be
//! redefined from inside the template with a `{{=<% %>=}}` tag. The change
//! tag is handled inline while the cursor is still inside the tag; no token
//! is emitted for it.

use crate::scanner::cursor::Cursor;
use crate::scanner::interface::ScanError;

pub const DEFAULT_OPEN: &str = "{{";
pub const DEFAULT_CLOSE: &str = "}}";

/// The active delimiter pair. Both parts are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters {
            open: DEFAULT_OPEN.to_string(),
            close: DEFAULT_CLOSE.to_string(),
        }
    }
}

impl Delimiters {
    /// Parse an `"OPEN CLOSE"` specification. Exactly two non-empty
    /// whitespace-separated parts are required.
    pub fn parse(spec: &str) -> Result<Self, ScanError> {
        let mut parts = spec.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(open), Some(close), None) => Ok(Delimiters {
                open: open.to_string(),
                close: close.to_string(),
            }),
            _ => Err(ScanError::InvalidDelimiters(spec.to_string())),
        }
    }

    /// Handle an in-template delimiter change.
    ///
    /// The cursor sits just past the `=` sigil of a `{{=<% %>=}}` tag. Reads
    /// the new pair up to the `=` terminator, requires the current close
    /// delimiter right after it, and installs the pair. On success the
    /// cursor is left just past the closing delimiter, so the scanner
    /// resumes in text state.
    pub fn change_from(&mut self, cursor: &mut Cursor) -> Result<(), ScanError> {
        let at = cursor.pos();
        let body = cursor
            .take_until('=')
            .ok_or(ScanError::MalformedDelimiterChange { at })?;
        cursor.skip(1); // the terminator
        if !cursor.matches(&self.close) {
            return Err(ScanError::MalformedDelimiterChange { at });
        }
        let close_len = self.close.len();
        *self = Delimiters::parse(body)
            .map_err(|_| ScanError::MalformedDelimiterChange { at })?;
        cursor.skip(close_len);
        Ok(())
    }
}
