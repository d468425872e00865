//! Character cursor for traversing source code.
//!
//! The cursor maintains a byte position plus 1-based line/column counters
//! while stepping through the source. It handles UTF-8 correctly (the
//! divider tokens use box-drawing characters) and never indexes past the
//! end of input: probing beyond the last character yields `'\0'`.

/// A cursor over source text.
///
/// # Example
///
/// ```
/// use ctlfmt_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("int x;");
/// assert_eq!(cursor.current_char(), 'i');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), 'n');
/// ```
pub struct Cursor<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte position in the source.
    position: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (1-based, in characters).
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the character under the cursor, or `'\0'` at end of input.
    #[inline]
    pub fn current_char(&self) -> char {
        self.peek_char(0)
    }

    /// Returns the character `offset` characters ahead of the cursor,
    /// or `'\0'` if that runs past the end of input.
    pub fn peek_char(&self, offset: usize) -> char {
        self.source[self.position..]
            .chars()
            .nth(offset)
            .unwrap_or('\0')
    }

    /// Advances the cursor one character, updating line/column tracking.
    /// Does nothing at end of input.
    #[inline]
    pub fn advance(&mut self) {
        if self.position >= self.source.len() {
            return;
        }

        // Fast path for ASCII (most common).
        let b = self.source.as_bytes()[self.position];
        let c = if b < 128 {
            self.position += 1;
            b as char
        } else {
            let c = self.source[self.position..].chars().next().unwrap_or('\0');
            self.position += c.len_utf8();
            c
        };

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Advances the cursor by `count` characters, stopping at end of input.
    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    /// Returns true once the whole source has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Consumes the expected character if it is under the cursor.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// True if the unconsumed source begins with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.source[self.position..].starts_with(prefix)
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns the current byte position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the source slice from `start` up to the cursor.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Returns the unconsumed remainder of the source.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }
}
