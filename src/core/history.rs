//! Linear undo/redo history
//!
//! Holds executed, undoable commands in order. `applied` counts how many of
//! them are currently reflected in the buffer; pushing after an undo drops
//! the undone future for good.

use std::collections::VecDeque;

use crate::core::command::Command;
use crate::core::error::EditError;
use crate::core::state::EditorState;

pub const DEFAULT_HISTORY_LIMIT: usize = 10_000;

#[derive(Debug, Clone)]
pub struct CommandHistory {
    commands: VecDeque<Box<dyn Command>>,
    applied: usize,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            commands: VecDeque::new(),
            applied: 0,
            limit: limit.max(1),
        }
    }

    /// Append an executed command, truncating any redo branch
    pub fn push(&mut self, command: Box<dyn Command>) {
        self.commands.truncate(self.applied);
        self.commands.push_back(command);
        if self.commands.len() > self.limit {
            self.commands.pop_front();
        }
        self.applied = self.commands.len();
    }

    /// Undo the last applied command. Returns `Ok(false)` when there is
    /// nothing to undo. The index moves back even if the command's undo
    /// fails; the error is handed back for reporting.
    pub fn undo(&mut self, state: &mut EditorState) -> Result<bool, EditError> {
        if self.applied == 0 {
            return Ok(false);
        }
        self.applied -= 1;
        let command = &mut self.commands[self.applied];
        match command.undo(state) {
            Ok(()) => Ok(true),
            Err(err) => {
                log::warn!("undo of {} failed: {err}", command.id());
                Err(err)
            }
        }
    }

    /// Re-execute the next undone command. Its result is ignored.
    pub fn redo(&mut self, state: &mut EditorState) -> bool {
        if !self.can_redo() {
            return false;
        }
        let command = &mut self.commands[self.applied];
        self.applied += 1;
        let result = command.execute(state);
        log::debug!("redo {} -> {:?}", command.id(), result);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.commands.len()
    }

    /// Index of the last applied entry; `None` at the base state
    pub fn undo_index(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.applied = 0;
    }
}
