//! Selection Model
//!
//! A visual selection is an anchor plus the live cursor. Bounds are always
//! normalized so that `start() <= end()`, whichever way the user extended it.
//! [`TextRange`] is the half-open span that operators actually mutate.

use std::cmp::{max, min};

use crate::core::buffer::{Buffer, Position};

// =============================================================================
// SELECTION STRUCT
// =============================================================================

/// Anchor-to-cursor selection in grapheme coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Where the selection started
    pub anchor: Position,
    /// Where it currently ends
    pub cursor: Position,
}

impl Selection {
    pub fn new(anchor: Position, cursor: Position) -> Self {
        Self { anchor, cursor }
    }

    /// The smaller position
    pub fn start(&self) -> Position {
        min(self.anchor, self.cursor)
    }

    /// The larger position (inclusive)
    pub fn end(&self) -> Position {
        max(self.anchor, self.cursor)
    }

    /// Covered rows, top first
    pub fn rows(&self) -> (usize, usize) {
        (self.start().row, self.end().row)
    }

    /// Span covered by a characterwise selection
    pub fn charwise_range(&self, buffer: &Buffer) -> TextRange {
        TextRange::new(self.start(), inclusive_end(buffer, self.end()))
    }
}

// =============================================================================
// RANGES
// =============================================================================

/// Half-open span `[start, end)`. `end` may be `(row + 1, 0)` to include a
/// line separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Exclusive end that covers the grapheme at `pos`.
///
/// On an empty line, or past the last grapheme, the line separator is the
/// covered character (except on the final line, which has none).
pub fn inclusive_end(buffer: &Buffer, pos: Position) -> Position {
    let len = buffer.line_len(pos.row);
    if pos.col < len {
        Position::new(pos.row, pos.col + 1)
    } else if pos.row < buffer.last_row() {
        Position::new(pos.row + 1, 0)
    } else {
        Position::new(pos.row, len)
    }
}

/// Span that removes rows `first..=last` entirely, separators included.
///
/// Removing the final rows eats the separator before them instead of after;
/// removing every row leaves a single empty line.
pub fn linewise_range(buffer: &Buffer, first: usize, last: usize) -> TextRange {
    let last_row = buffer.last_row();
    let last = last.min(last_row);
    let first = first.min(last);
    if last < last_row {
        TextRange::new(Position::new(first, 0), Position::new(last + 1, 0))
    } else if first > 0 {
        TextRange::new(
            Position::new(first - 1, buffer.line_len(first - 1)),
            Position::new(last, buffer.line_len(last)),
        )
    } else {
        TextRange::new(Position::new(0, 0), Position::new(last, buffer.line_len(last)))
    }
}

/// Rows `first..=last` joined with `\n`, as stored in a linewise register
pub fn joined_lines(buffer: &Buffer, first: usize, last: usize) -> String {
    (first..=last.min(buffer.last_row()))
        .map(|row| buffer.line(row))
        .collect::<Vec<_>>()
        .join("\n")
}
