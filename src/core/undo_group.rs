//! Reversible edit records.
//!
//! Commands capture every buffer mutation they perform as an [`Edit`] inside
//! an [`UndoGroup`]. Reverting walks the group backwards; replaying walks it
//! forwards. Both verify that the buffer still holds the recorded text before
//! removing anything, so a stale group reports `ContentMismatch` instead of
//! corrupting the buffer.

use crate::core::buffer::{Buffer, BytePos, Position};
use crate::core::error::EditError;

/// One primitive buffer mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// `text` was inserted at `at`
    Insert { at: BytePos, text: String },
    /// `text` was removed starting at `at`
    Delete { at: BytePos, text: String },
}

impl Edit {
    fn remove_expected(buffer: &mut Buffer, at: BytePos, text: &str) -> Result<(), EditError> {
        let end = at.advanced_by(text);
        if buffer.slice(at, end)? != text {
            return Err(EditError::ContentMismatch { row: at.row });
        }
        buffer.remove(at, end)?;
        Ok(())
    }

    /// Perform the edit again
    pub fn apply(&self, buffer: &mut Buffer) -> Result<(), EditError> {
        match self {
            Edit::Insert { at, text } => buffer.insert(*at, text).map(|_| ()),
            Edit::Delete { at, text } => Self::remove_expected(buffer, *at, text),
        }
    }

    /// Undo the edit
    pub fn revert(&self, buffer: &mut Buffer) -> Result<(), EditError> {
        match self {
            Edit::Insert { at, text } => Self::remove_expected(buffer, *at, text),
            Edit::Delete { at, text } => buffer.insert(*at, text).map(|_| ()),
        }
    }
}

/// The edits one command performed, plus the cursor on either side of them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoGroup {
    pub edits: Vec<Edit>,
    pub cursor_before: Position,
    pub cursor_after: Position,
}

impl UndoGroup {
    pub fn new(cursor_before: Position) -> Self {
        Self {
            edits: Vec::new(),
            cursor_before,
            cursor_after: cursor_before,
        }
    }

    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Re-apply every edit in order
    pub fn replay(&self, buffer: &mut Buffer) -> Result<(), EditError> {
        for edit in &self.edits {
            edit.apply(buffer)?;
        }
        Ok(())
    }

    /// Revert every edit, newest first
    pub fn revert(&self, buffer: &mut Buffer) -> Result<(), EditError> {
        for edit in self.edits.iter().rev() {
            edit.revert(buffer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with(edits: Vec<Edit>) -> UndoGroup {
        UndoGroup {
            edits,
            ..UndoGroup::default()
        }
    }

    #[test]
    fn test_revert_and_replay_restore_content() {
        let mut buffer = Buffer::from_string("hello world");
        let edits = vec![
            Edit::Delete {
                at: BytePos::new(0, 5),
                text: " world".to_string(),
            },
            Edit::Insert {
                at: BytePos::new(0, 5),
                text: "\nthere".to_string(),
            },
        ];
        let group = group_with(edits);
        group.replay(&mut buffer).unwrap();
        assert_eq!(buffer.to_string(), "hello\nthere");

        group.revert(&mut buffer).unwrap();
        assert_eq!(buffer.to_string(), "hello world");
    }

    #[test]
    fn test_revert_detects_stale_content() {
        let mut buffer = Buffer::from_string("abc");
        let group = group_with(vec![Edit::Insert {
            at: BytePos::new(0, 0),
            text: "xy".to_string(),
        }]);
        assert_eq!(
            group.revert(&mut buffer),
            Err(EditError::ContentMismatch { row: 0 })
        );
        assert_eq!(buffer.to_string(), "abc");
    }

    #[test]
    fn test_zwj_cluster_reverts_byte_exact() {
        let family = "👨‍👩‍👦";
        let mut buffer = Buffer::from_string(format!("a{family}b"));
        let group = group_with(vec![Edit::Delete {
            at: BytePos::new(0, 1),
            text: family.to_string(),
        }]);
        group.replay(&mut buffer).unwrap();
        assert_eq!(buffer.to_string(), "ab");
        group.revert(&mut buffer).unwrap();
        assert_eq!(buffer.to_string(), format!("a{family}b"));
    }
}
