//! Mutable editing state: buffer, cursor, mode, visual anchor, register.
//!
//! Commands receive `&mut EditorState` and perform all content changes
//! through [`EditorState::insert_text`] and [`EditorState::delete_range`],
//! which record each primitive edit into the caller's [`UndoGroup`].

use crate::core::buffer::{Buffer, Position};
use crate::core::error::EditError;
use crate::core::mode::Mode;
use crate::core::register::YankRegister;
use crate::core::selection::Selection;
use crate::core::undo_group::{Edit, UndoGroup};
use crate::core::utf8;

/// Default display width of a tab
pub const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Clone)]
pub struct EditorState {
    pub buffer: Buffer,
    pub cursor: Position,
    pub mode: Mode,
    /// Fixed end of the selection while in Visual or Visual-Line mode
    pub visual_anchor: Option<Position>,
    pub register: YankRegister,
    /// Column vertical motions try to return to. `usize::MAX` after `$`.
    pub preferred_col: usize,
    /// Soft-wrap width hint for display-row motions; 0 disables wrapping
    pub width: usize,
    pub tab_width: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            buffer: Buffer::new(),
            cursor: Position::default(),
            mode: Mode::Normal,
            visual_anchor: None,
            register: YankRegister::new(),
            preferred_col: 0,
            width: 0,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    pub fn from_content(content: &str) -> Self {
        Self {
            buffer: Buffer::from_string(content),
            ..Self::new()
        }
    }

    // ==================== Queries ====================

    pub fn line(&self, row: usize) -> String {
        self.buffer.line(row)
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.buffer.line_len(row)
    }

    pub fn last_row(&self) -> usize {
        self.buffer.last_row()
    }

    /// Highest column the cursor may occupy on `row` in `mode`
    pub fn max_col(&self, row: usize, mode: Mode) -> usize {
        let len = self.line_len(row);
        if mode.allows_append_column() {
            len
        } else {
            len.saturating_sub(1)
        }
    }

    /// Clamp an arbitrary position into the buffer for `mode`
    pub fn clamp(&self, pos: Position, mode: Mode) -> Position {
        let row = pos.row.min(self.last_row());
        Position::new(row, pos.col.min(self.max_col(row, mode)))
    }

    /// Pull the cursor (and visual anchor) back inside the buffer
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.clamp(self.cursor, self.mode);
        if let Some(anchor) = self.visual_anchor {
            self.visual_anchor = Some(self.clamp(anchor, Mode::Normal));
        }
    }

    /// Index of the first non-blank grapheme on `row` (0 when all blank)
    pub fn first_non_blank(&self, row: usize) -> usize {
        utf8::graphemes(&self.line(row))
            .iter()
            .position(|g| !utf8::is_blank(g))
            .unwrap_or(0)
    }

    /// The live selection, if a visual mode is active
    pub fn selection(&self) -> Option<Selection> {
        if !self.mode.is_visual() {
            return None;
        }
        self.visual_anchor.map(|anchor| Selection::new(anchor, self.cursor))
    }

    /// Text between two positions (`end` exclusive, may be `(row + 1, 0)`)
    pub fn text_range(&self, start: Position, end: Position) -> Result<String, EditError> {
        let a = self.buffer.byte_pos(start)?;
        let b = self.buffer.byte_pos(end)?;
        self.buffer.slice(a, b)
    }

    // ==================== Recorded Mutation ====================

    /// Insert `text` at `at`, recording the edit. Returns the position just
    /// past the inserted text.
    pub fn insert_text(
        &mut self,
        at: Position,
        text: &str,
        group: &mut UndoGroup,
    ) -> Result<Position, EditError> {
        let at = self.buffer.byte_pos(at)?;
        let end = self.buffer.insert(at, text)?;
        if !text.is_empty() {
            group.add_edit(Edit::Insert {
                at,
                text: text.to_string(),
            });
        }
        Ok(self.buffer.position(end))
    }

    /// Remove `[start, end)`, recording the edit, and return the removed text
    pub fn delete_range(
        &mut self,
        start: Position,
        end: Position,
        group: &mut UndoGroup,
    ) -> Result<String, EditError> {
        let a = self.buffer.byte_pos(start)?;
        let b = self.buffer.byte_pos(end)?;
        let removed = self.buffer.remove(a, b)?;
        if !removed.is_empty() {
            group.add_edit(Edit::Delete {
                at: a,
                text: removed.clone(),
            });
        }
        Ok(removed)
    }
}
