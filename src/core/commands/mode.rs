//! Mode entry and exit commands

use crate::core::buffer::Position;
use crate::core::command::{Command, CommandFamily, ExecuteResult, Recorded};
use crate::core::error::EditError;
use crate::core::mode::Mode;
use crate::core::state::EditorState;

/// Where `i`-family commands put the cursor before entering Insert mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEntry {
    /// `i`
    Before,
    /// `a`
    After,
    /// `I`
    LineStart,
    /// `A`
    LineEnd,
}

/// Enter Insert mode
#[derive(Debug, Clone)]
pub struct EnterInsert {
    pub entry: InsertEntry,
}

impl Command for EnterInsert {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let row = state.cursor.row;
        let len = state.line_len(row);
        let col = match self.entry {
            InsertEntry::Before => state.cursor.col,
            InsertEntry::After => (state.cursor.col + 1).min(len),
            InsertEntry::LineStart => state.first_non_blank(row),
            InsertEntry::LineEnd => len,
        };
        state.mode = Mode::Insert;
        state.cursor = Position::new(row, col);
        ExecuteResult::Executed
    }

    fn keys(&self) -> &[&'static str] {
        match self.entry {
            InsertEntry::Before => &["i"],
            InsertEntry::After => &["a"],
            InsertEntry::LineStart => &["I"],
            InsertEntry::LineEnd => &["A"],
        }
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        match self.entry {
            InsertEntry::Before => "insert_before",
            InsertEntry::After => "insert_after",
            InsertEntry::LineStart => "insert_line_start",
            InsertEntry::LineEnd => "insert_line_end",
        }
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::ModeEntry
    }
}

/// `v` / `V`: enter, toggle off, or switch between the visual modes
#[derive(Debug, Clone)]
pub struct EnterVisual {
    pub linewise: bool,
    pub mode: Mode,
}

impl Command for EnterVisual {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let target = if self.linewise {
            Mode::VisualLine
        } else {
            Mode::Visual
        };
        if state.mode == target {
            state.mode = Mode::Normal;
            state.visual_anchor = None;
        } else {
            if !state.mode.is_visual() || state.visual_anchor.is_none() {
                state.visual_anchor = Some(state.cursor);
            }
            state.mode = target;
        }
        ExecuteResult::Executed
    }

    fn keys(&self) -> &[&'static str] {
        if self.linewise { &["V"] } else { &["v"] }
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn id(&self) -> &'static str {
        if self.linewise {
            "enter_visual_line"
        } else {
            "enter_visual"
        }
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::ModeEntry
    }
}

/// `R`
#[derive(Debug, Clone)]
pub struct EnterReplace;

impl Command for EnterReplace {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        state.mode = Mode::Replace;
        ExecuteResult::Executed
    }

    fn keys(&self) -> &[&'static str] {
        &["R"]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        "enter_replace"
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::ModeEntry
    }
}

/// `<escape>`: back to Normal mode. Leaving Insert or Replace steps the
/// cursor back one grapheme, as Vim does.
#[derive(Debug, Clone)]
pub struct ExitMode {
    pub mode: Mode,
}

impl Command for ExitMode {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        match state.mode {
            Mode::Normal => return ExecuteResult::Skipped,
            Mode::Insert | Mode::Replace => {
                state.cursor.col = state.cursor.col.saturating_sub(1);
            }
            Mode::Visual | Mode::VisualLine => state.visual_anchor = None,
        }
        state.mode = Mode::Normal;
        ExecuteResult::Executed
    }

    fn keys(&self) -> &[&'static str] {
        &["<escape>"]
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn id(&self) -> &'static str {
        "exit_mode"
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::ModeEntry
    }
}

/// `o` / `O`: open a new line below or above and start inserting on it
#[derive(Debug, Clone)]
pub struct OpenLine {
    pub above: bool,
    recorded: Recorded,
}

impl OpenLine {
    pub fn new(above: bool) -> Self {
        Self {
            above,
            recorded: Recorded::default(),
        }
    }
}

impl Command for OpenLine {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let (id, above) = (self.id(), self.above);
        self.recorded.run(id, state, |state, group| {
            let row = state.cursor.row;
            if above {
                state.insert_text(Position::new(row, 0), "\n", group)?;
                state.cursor = Position::new(row, 0);
            } else {
                let len = state.line_len(row);
                state.insert_text(Position::new(row, len), "\n", group)?;
                state.cursor = Position::new(row + 1, 0);
            }
            state.mode = Mode::Insert;
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        let id = self.id();
        self.recorded.undo(id, state)?;
        state.mode = Mode::Normal;
        Ok(())
    }

    fn keys(&self) -> &[&'static str] {
        if self.above { &["O"] } else { &["o"] }
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        if self.above {
            "open_line_above"
        } else {
            "open_line_below"
        }
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Change
    }
}
