//! Command Pattern implementation for the editing engine
//!
//! Every key binding resolves to a value implementing [`Command`]. Commands
//! are cloned out of a prototype registry per key event, executed once, and
//! kept in history when they are undoable. Content-changing commands capture
//! their edits in a [`Recorded`] slot so that `undo` reverts them exactly and
//! a second `execute` (redo) replays them without consulting the mode.

use std::fmt;

use crate::core::buffer::Position;
use crate::core::error::EditError;
use crate::core::history::CommandHistory;
use crate::core::mode::Mode;
use crate::core::state::EditorState;
use crate::core::undo_group::UndoGroup;

/// Outcome of a single `execute`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteResult {
    /// State changed (or a legitimate no-op change); eligible for history
    Executed,
    /// Preconditions unmet; nothing changed
    Skipped,
    /// The command declines and the host should handle the key itself
    PassThrough,
}

/// Base behaviour shared by groups of commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFamily {
    /// Cursor-only navigation
    Motion,
    /// Switches mode without touching content
    ModeEntry,
    /// Mutates content and stays in the current mode
    Edit,
    /// Mutates content and ends in Insert mode
    Change,
    /// Copies text into the register
    Yank,
    /// Walks the undo history; never pushed onto it
    History,
}

impl CommandFamily {
    pub fn is_undoable(self) -> bool {
        matches!(self, CommandFamily::Edit | CommandFamily::Change)
    }

    pub fn changes_content(self) -> bool {
        matches!(self, CommandFamily::Edit | CommandFamily::Change)
    }

    pub fn is_mode_change(self) -> bool {
        matches!(self, CommandFamily::ModeEntry | CommandFamily::Change)
    }
}

/// Region a renderer may flash after a yank or text-object selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YankHighlight {
    pub start: Position,
    /// Inclusive
    pub end: Position,
    pub linewise: bool,
    /// False when the operation found nothing to highlight
    pub show: bool,
}

impl YankHighlight {
    pub fn hidden() -> Self {
        Self {
            start: Position::default(),
            end: Position::default(),
            linewise: false,
            show: false,
        }
    }
}

/// Core command trait implementing the Command Pattern
pub trait Command: Send + Sync + CloneCommand + fmt::Debug {
    /// Run against the editor state. Called again on the same instance for redo.
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult;

    /// Entry point used by the dispatcher. Only history commands look at
    /// `history`; the rest run plain `execute`.
    fn execute_with_history(
        &mut self,
        state: &mut EditorState,
        _history: &mut CommandHistory,
    ) -> ExecuteResult {
        self.execute(state)
    }

    /// Exactly invert the last successful `execute`
    fn undo(&mut self, _state: &mut EditorState) -> Result<(), EditError> {
        Ok(())
    }

    /// Key tokens that trigger this command. Commands reached through a
    /// pending operator list the sequence typed after the operator (`"iw"`).
    fn keys(&self) -> &[&'static str];

    /// Mode the binding belongs to
    fn mode(&self) -> Mode;

    /// Stable identifier
    fn id(&self) -> &'static str;

    fn family(&self) -> CommandFamily;

    fn is_undoable(&self) -> bool {
        self.family().is_undoable()
    }

    fn changes_content(&self) -> bool {
        self.family().changes_content()
    }

    fn is_mode_change(&self) -> bool {
        self.family().is_mode_change()
    }

    /// Vertical motions keep the remembered column themselves; everything
    /// else resets it to wherever the cursor lands.
    fn manages_preferred_column(&self) -> bool {
        false
    }

    fn yank_highlight(&self) -> Option<YankHighlight> {
        None
    }
}

/// Helper trait for cloning boxed commands
/// This trait is automatically implemented for all Command types
pub trait CloneCommand {
    /// Create a boxed clone of this command
    fn clone_box(&self) -> Box<dyn Command>;
}

impl<T> CloneCommand for T
where
    T: 'static + Command + Clone,
{
    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Box<dyn Command> {
        self.as_ref().clone_box()
    }
}

// =============================================================================
// RECORDED EDITS
// =============================================================================

/// Undo capture for a content-changing command.
///
/// Empty until the first successful execution; afterwards it holds the edit
/// group, and further executions replay that group verbatim.
#[derive(Debug, Clone, Default)]
pub struct Recorded {
    group: Option<UndoGroup>,
}

impl Recorded {
    pub fn is_executed(&self) -> bool {
        self.group.is_some()
    }

    /// First execution runs `first`, which returns `Ok(true)` when it
    /// changed the state and `Ok(false)` to skip. Later executions replay.
    ///
    /// A failing `first` has its partial edits rolled back and reports
    /// `Skipped`.
    pub fn run<F>(&mut self, id: &'static str, state: &mut EditorState, first: F) -> ExecuteResult
    where
        F: FnOnce(&mut EditorState, &mut UndoGroup) -> Result<bool, EditError>,
    {
        if let Some(group) = &self.group {
            return match group.replay(&mut state.buffer) {
                Ok(()) => {
                    state.cursor = group.cursor_after;
                    ExecuteResult::Executed
                }
                Err(err) => {
                    log::warn!("{id}: replay failed: {err}");
                    ExecuteResult::Skipped
                }
            };
        }

        let mode_before = state.mode;
        let mut group = UndoGroup::new(state.cursor);
        match first(state, &mut group) {
            Ok(true) => {
                group.cursor_after = state.cursor;
                self.group = Some(group);
                ExecuteResult::Executed
            }
            Ok(false) => ExecuteResult::Skipped,
            Err(err) => {
                log::warn!("{id}: {err}");
                if let Err(rollback) = group.revert(&mut state.buffer) {
                    log::warn!("{id}: rollback failed: {rollback}");
                }
                state.cursor = group.cursor_before;
                state.mode = mode_before;
                ExecuteResult::Skipped
            }
        }
    }

    /// Revert the captured group and put the cursor back
    pub fn undo(&self, id: &'static str, state: &mut EditorState) -> Result<(), EditError> {
        let group = self.group.as_ref().ok_or(EditError::NotExecuted(id))?;
        group.revert(&mut state.buffer)?;
        state.cursor = group.cursor_before;
        Ok(())
    }
}
