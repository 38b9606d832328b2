//! Explicit cursor over the template source.
//!
//! The three scanner states all look ahead by known widths: the open/close
//! delimiter length, the one-character sigil, and the single absorbed brace
//! of a `{{{name}}}` tag. The cursor packages those operations so the state
//! machine never does raw index arithmetic on the source.
//!
//! Positions are byte offsets. `skip` is only ever called with the byte
//! length of a pattern that was just matched at the current position, so it
//! always lands on a character boundary.

/// A forward-only cursor over `&str` source text.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// The unconsumed remainder of the source.
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// The character at the cursor, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the current one, without consuming anything.
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Consume and return the character at the cursor.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// True if the unconsumed source starts with `pat`.
    pub fn matches(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advance by `n` bytes. `n` must be the length of a pattern matched at
    /// the current position.
    pub fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.src.len());
    }

    /// Consume up to (but not including) the next occurrence of `needle`,
    /// returning the consumed slice. Leaves the cursor on the needle, or
    /// returns `None` without moving when the needle does not occur.
    pub fn take_until(&mut self, needle: char) -> Option<&'a str> {
        let at = self.rest().find(needle)?;
        let taken = &self.rest()[..at];
        self.pos += at;
        Some(taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_bump() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek_second(), Some('b'));
        assert_eq!(cursor.bump(), Some('a'));
        assert_eq!(cursor.pos(), 1);
        assert_eq!(cursor.bump(), Some('b'));
        assert_eq!(cursor.bump(), None);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_matches_at_position() {
        let mut cursor = Cursor::new("x{{y");
        assert!(!cursor.matches("{{"));
        cursor.bump();
        assert!(cursor.matches("{{"));
        cursor.skip(2);
        assert_eq!(cursor.peek(), Some('y'));
    }

    #[test]
    fn test_take_until_stops_on_needle() {
        let mut cursor = Cursor::new("<% %>=}}");
        assert_eq!(cursor.take_until('='), Some("<% %>"));
        assert_eq!(cursor.peek(), Some('='));
    }

    #[test]
    fn test_take_until_missing_needle_does_not_move() {
        let mut cursor = Cursor::new("abc");
        cursor.bump();
        assert_eq!(cursor.take_until('='), None);
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn test_bump_is_utf8_aware() {
        let mut cursor = Cursor::new("é}");
        assert_eq!(cursor.bump(), Some('é'));
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.peek(), Some('}'));
    }

    #[test]
    fn test_skip_clamps_to_end() {
        let mut cursor = Cursor::new("ab");
        cursor.skip(10);
        assert!(cursor.is_at_end());
    }
}
