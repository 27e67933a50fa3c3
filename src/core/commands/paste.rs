//! Put the yank register back into the buffer (`p` / `P`)

use crate::core::buffer::Position;
use crate::core::command::{Command, CommandFamily, ExecuteResult, Recorded};
use crate::core::error::EditError;
use crate::core::mode::Mode;
use crate::core::state::EditorState;

/// Linewise text goes on its own line below (`p`) or above (`P`) the cursor
/// line. Charwise text goes after (`p`) or at (`P`) the cursor.
#[derive(Debug, Clone)]
pub struct Paste {
    before: bool,
    recorded: Recorded,
}

impl Paste {
    pub fn new(before: bool) -> Self {
        Self {
            before,
            recorded: Recorded::default(),
        }
    }
}

impl Command for Paste {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let (id, before) = (self.id(), self.before);
        self.recorded.run(id, state, |state, group| {
            if state.register.is_empty() {
                return Ok(false);
            }
            let text = state.register.text().to_string();
            let row = state.cursor.row;

            if state.register.is_linewise() {
                let target = if before {
                    state.insert_text(Position::new(row, 0), &format!("{text}\n"), group)?;
                    row
                } else {
                    let len = state.line_len(row);
                    state.insert_text(Position::new(row, len), &format!("\n{text}"), group)?;
                    row + 1
                };
                state.cursor = Position::new(target, state.first_non_blank(target));
                return Ok(true);
            }

            let len = state.line_len(row);
            let at = if before || len == 0 {
                Position::new(row, state.cursor.col.min(len))
            } else {
                Position::new(row, (state.cursor.col + 1).min(len))
            };
            let end = state.insert_text(at, &text, group)?;
            // Multi-line text leaves the cursor where the paste began
            state.cursor = if text.contains('\n') {
                at
            } else {
                Position::new(end.row, end.col.saturating_sub(1))
            };
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        let id = self.id();
        self.recorded.undo(id, state)
    }

    fn keys(&self) -> &[&'static str] {
        if self.before { &["P"] } else { &["p"] }
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        if self.before { "paste_before" } else { "paste_after" }
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Edit
    }
}
