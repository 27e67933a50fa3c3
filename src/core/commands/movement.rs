//! Cursor movement commands

use crate::core::command::{Command, CommandFamily, ExecuteResult};
use crate::core::mode::Mode;
use crate::core::motion::Motion;
use crate::core::state::EditorState;

/// Move the cursor by a [`Motion`]. One prototype per (mode, key).
#[derive(Debug, Clone)]
pub struct MoveCommand {
    motion: Motion,
    mode: Mode,
    keys: &'static [&'static str],
}

impl MoveCommand {
    pub fn new(motion: Motion, mode: Mode, keys: &'static [&'static str]) -> Self {
        Self { motion, mode, keys }
    }
}

impl Command for MoveCommand {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        state.cursor = self.motion.target(state, state.mode);
        if self.motion == Motion::LineEnd {
            state.preferred_col = usize::MAX;
        }
        ExecuteResult::Executed
    }

    fn keys(&self) -> &[&'static str] {
        self.keys
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn id(&self) -> &'static str {
        match self.motion {
            Motion::Left => "move_left",
            Motion::Right => "move_right",
            Motion::Up => "move_up",
            Motion::Down => "move_down",
            Motion::DisplayUp => "move_display_up",
            Motion::DisplayDown => "move_display_down",
            Motion::WordForward => "word_forward",
            Motion::BigWordForward => "big_word_forward",
            Motion::WordBackward => "word_backward",
            Motion::BigWordBackward => "big_word_backward",
            Motion::WordEnd => "word_end",
            Motion::BigWordEnd => "big_word_end",
            Motion::LineStart => "line_start",
            Motion::FirstNonBlank => "first_non_blank",
            Motion::LineEnd => "line_end",
            Motion::BufferTop => "buffer_top",
            Motion::BufferBottom => "buffer_bottom",
        }
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Motion
    }

    fn manages_preferred_column(&self) -> bool {
        self.motion.uses_preferred_column() || self.motion == Motion::LineEnd
    }
}
