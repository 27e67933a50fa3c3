//! History navigation (`u` / `<ctrl+r>`)
//!
//! Neither command is pushed onto the history they walk. Without a history
//! to work on they hand the key back to the host.

use crate::core::command::{Command, CommandFamily, ExecuteResult};
use crate::core::history::CommandHistory;
use crate::core::mode::Mode;
use crate::core::state::EditorState;

/// Undo the last applied command
#[derive(Debug, Clone)]
pub struct Undo;

impl Command for Undo {
    fn execute(&mut self, _state: &mut EditorState) -> ExecuteResult {
        ExecuteResult::PassThrough
    }

    fn execute_with_history(
        &mut self,
        state: &mut EditorState,
        history: &mut CommandHistory,
    ) -> ExecuteResult {
        match history.undo(state) {
            Ok(true) => ExecuteResult::Executed,
            Ok(false) => ExecuteResult::Skipped,
            // The entry still counts as undone
            Err(_) => ExecuteResult::Executed,
        }
    }

    fn keys(&self) -> &[&'static str] {
        &["u"]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        "undo"
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::History
    }
}

/// Redo the last undone command. Falls through to the host when there is
/// nothing to redo.
#[derive(Debug, Clone)]
pub struct Redo;

impl Command for Redo {
    fn execute(&mut self, _state: &mut EditorState) -> ExecuteResult {
        ExecuteResult::PassThrough
    }

    fn execute_with_history(
        &mut self,
        state: &mut EditorState,
        history: &mut CommandHistory,
    ) -> ExecuteResult {
        if history.redo(state) {
            ExecuteResult::Executed
        } else {
            ExecuteResult::PassThrough
        }
    }

    fn keys(&self) -> &[&'static str] {
        &["<ctrl+r>"]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        "redo"
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::History
    }
}
