//! Buffer: the line-oriented text model.
//!
//! Content lives in a ropey `Rope` built with only `\n` as a line break, so a
//! buffer always has at least one line (an empty rope reports one). Public
//! coordinates are grapheme [`Position`]s; reversible mutation goes through
//! byte-addressed [`BytePos`] edits that are validated before they touch the
//! rope, so a bad offset returns an error instead of panicking.

use std::fmt;

use ropey::Rope;

use crate::core::error::EditError;
use crate::core::utf8;

/// Cursor-style coordinate: `col` is a grapheme index within `row`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Byte-exact coordinate used by edits: `byte` is an offset into the line text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BytePos {
    pub row: usize,
    pub byte: usize,
}

impl BytePos {
    pub const fn new(row: usize, byte: usize) -> Self {
        Self { row, byte }
    }

    /// Position just past `text` when it is inserted at `self`
    pub fn advanced_by(self, text: &str) -> BytePos {
        match text.rfind('\n') {
            Some(last_nl) => BytePos {
                row: self.row + text.matches('\n').count(),
                byte: text.len() - last_nl - 1,
            },
            None => BytePos {
                row: self.row,
                byte: self.byte + text.len(),
            },
        }
    }
}

/// Text content of one editor instance
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// Create a buffer holding a single empty line
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer from `\n`-separated text
    pub fn from_string(content: impl AsRef<str>) -> Self {
        Self {
            rope: Rope::from_str(content.as_ref()),
        }
    }

    /// Create a buffer from individual lines
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let joined = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_string(joined)
    }

    /// Replace the entire content
    pub fn set_content(&mut self, content: &str) {
        self.rope = Rope::from_str(content);
    }

    // ==================== Line Access ====================

    /// Number of lines; never zero
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn last_row(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    /// Text of a line without its separator.
    /// Rows past the end read as empty rather than failing.
    pub fn line(&self, row: usize) -> String {
        if row >= self.rope.len_lines() {
            return String::new();
        }
        let mut s = self.rope.line(row).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    /// Length of a line in graphemes
    pub fn line_len(&self, row: usize) -> usize {
        utf8::grapheme_count(&self.line(row))
    }

    /// All lines in order
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).map(|row| self.line(row)).collect()
    }

    // ==================== Coordinates ====================

    fn check_row(&self, row: usize) -> Result<(), EditError> {
        if row >= self.line_count() {
            return Err(EditError::RowOutOfRange {
                row,
                line_count: self.line_count(),
            });
        }
        Ok(())
    }

    /// Absolute byte index into the rope for a validated `BytePos`
    fn absolute_byte(&self, at: BytePos) -> Result<usize, EditError> {
        self.check_row(at.row)?;
        let line = self.line(at.row);
        if at.byte > line.len() || !line.is_char_boundary(at.byte) {
            return Err(EditError::NotCharBoundary {
                row: at.row,
                byte: at.byte,
            });
        }
        Ok(self.rope.line_to_byte(at.row) + at.byte)
    }

    /// Grapheme position → byte position; the column clamps to the line end
    pub fn byte_pos(&self, pos: Position) -> Result<BytePos, EditError> {
        self.check_row(pos.row)?;
        let line = self.line(pos.row);
        Ok(BytePos::new(pos.row, utf8::byte_offset(&line, pos.col)))
    }

    /// Byte position → grapheme position
    pub fn position(&self, at: BytePos) -> Position {
        let line = self.line(at.row);
        Position::new(at.row, utf8::byte_to_grapheme_col(&line, at.byte))
    }

    // ==================== Editing Operations ====================

    /// Insert `text` at `at`, returning the byte position just past it
    pub fn insert(&mut self, at: BytePos, text: &str) -> Result<BytePos, EditError> {
        let byte = self.absolute_byte(at)?;
        if !text.is_empty() {
            let char_idx = self.rope.byte_to_char(byte);
            self.rope.insert(char_idx, text);
        }
        Ok(at.advanced_by(text))
    }

    /// Text between two byte positions (`end` exclusive)
    pub fn slice(&self, start: BytePos, end: BytePos) -> Result<String, EditError> {
        let a = self.absolute_byte(start)?;
        let b = self.absolute_byte(end)?;
        if b <= a {
            return Ok(String::new());
        }
        Ok(self.rope.byte_slice(a..b).to_string())
    }

    /// Remove the text between two byte positions and return it
    pub fn remove(&mut self, start: BytePos, end: BytePos) -> Result<String, EditError> {
        let a = self.absolute_byte(start)?;
        let b = self.absolute_byte(end)?;
        if b <= a {
            return Ok(String::new());
        }
        let removed = self.rope.byte_slice(a..b).to_string();
        let start_char = self.rope.byte_to_char(a);
        let end_char = self.rope.byte_to_char(b);
        self.rope.remove(start_char..end_char);
        Ok(removed)
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
