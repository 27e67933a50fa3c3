//! Visual-mode operators and text-object selection.
//!
//! A visual delete or change reads the live selection only on its first run.
//! Redo replays the recorded edits, so it works after the selection and
//! Visual mode are long gone.

use crate::core::buffer::Position;
use crate::core::command::{Command, CommandFamily, ExecuteResult, Recorded, YankHighlight};
use crate::core::commands::operator::Operator;
use crate::core::error::EditError;
use crate::core::mode::Mode;
use crate::core::selection::{Selection, TextRange, joined_lines, linewise_range};
use crate::core::state::EditorState;
use crate::core::text_object::TextObject;

/// What the selection covers once an operator is applied to it
struct Span {
    range: TextRange,
    text: String,
    linewise: bool,
    first_row: usize,
}

fn selected_span(state: &EditorState, selection: Selection, op: Operator) -> Result<Span, EditError> {
    let (first, last) = selection.rows();
    if state.mode == Mode::VisualLine {
        // `c` keeps one empty line to type into
        let range = if op == Operator::Change {
            TextRange::new(
                Position::new(first, 0),
                Position::new(last, state.line_len(last)),
            )
        } else {
            linewise_range(&state.buffer, first, last)
        };
        Ok(Span {
            range,
            text: joined_lines(&state.buffer, first, last),
            linewise: true,
            first_row: first,
        })
    } else {
        let range = selection.charwise_range(&state.buffer);
        Ok(Span {
            range,
            text: state.text_range(range.start, range.end)?,
            linewise: false,
            first_row: first,
        })
    }
}

fn leave_visual(state: &mut EditorState, mode: Mode) {
    state.mode = mode;
    state.visual_anchor = None;
}

/// `d`/`x`, `c`/`s`, `y` on the visual selection
#[derive(Debug, Clone)]
pub struct VisualOperatorCommand {
    op: Operator,
    mode: Mode,
    keys: &'static [&'static str],
    recorded: Recorded,
    highlight: Option<YankHighlight>,
}

impl VisualOperatorCommand {
    pub fn new(op: Operator, mode: Mode, keys: &'static [&'static str]) -> Self {
        Self {
            op,
            mode,
            keys,
            recorded: Recorded::default(),
            highlight: None,
        }
    }

    fn execute_yank(&mut self, state: &mut EditorState) -> ExecuteResult {
        let Some(selection) = state.selection() else {
            return ExecuteResult::Skipped;
        };
        let span = match selected_span(state, selection, self.op) {
            Ok(span) => span,
            Err(err) => {
                log::warn!("{}: {err}", self.id());
                return ExecuteResult::Skipped;
            }
        };
        self.highlight = Some(YankHighlight {
            start: selection.start(),
            end: selection.end(),
            linewise: span.linewise,
            show: true,
        });
        state.register.store(span.text, span.linewise);
        leave_visual(state, Mode::Normal);
        state.cursor = if span.linewise {
            Position::new(span.first_row, state.cursor.col)
        } else {
            selection.start()
        };
        ExecuteResult::Executed
    }
}

impl Command for VisualOperatorCommand {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        if self.op == Operator::Yank {
            return self.execute_yank(state);
        }
        let (id, op) = (self.id(), self.op);
        self.recorded.run(id, state, |state, group| {
            let Some(selection) = state.selection() else {
                return Ok(false);
            };
            let span = selected_span(state, selection, op)?;
            state.delete_range(span.range.start, span.range.end, group)?;
            state.register.store(span.text, span.linewise);

            if op == Operator::Change {
                leave_visual(state, Mode::Insert);
                state.cursor = span.range.start;
            } else {
                leave_visual(state, Mode::Normal);
                state.cursor = if span.linewise {
                    let row = span.first_row.min(state.last_row());
                    Position::new(row, state.first_non_blank(row))
                } else {
                    span.range.start
                };
            }
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        let id = self.id();
        self.recorded.undo(id, state)?;
        if self.op == Operator::Change {
            state.mode = Mode::Normal;
        }
        Ok(())
    }

    fn keys(&self) -> &[&'static str] {
        self.keys
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn id(&self) -> &'static str {
        match self.op {
            Operator::Delete => "visual_delete",
            Operator::Change => "visual_change",
            Operator::Yank => "visual_yank",
        }
    }

    fn family(&self) -> CommandFamily {
        match self.op {
            Operator::Delete => CommandFamily::Edit,
            Operator::Change => CommandFamily::Change,
            Operator::Yank => CommandFamily::Yank,
        }
    }

    /// Every visual operator ends the selection
    fn is_mode_change(&self) -> bool {
        true
    }

    fn yank_highlight(&self) -> Option<YankHighlight> {
        self.highlight
    }
}

/// `viw`, `va"` and friends: select a text object charwise
#[derive(Debug, Clone)]
pub struct SelectTextObject {
    object: TextObject,
    inner: bool,
    mode: Mode,
    keys: &'static [&'static str],
    highlight: Option<YankHighlight>,
}

impl SelectTextObject {
    pub fn new(object: TextObject, inner: bool, mode: Mode, keys: &'static [&'static str]) -> Self {
        Self {
            object,
            inner,
            mode,
            keys,
            highlight: None,
        }
    }
}

impl Command for SelectTextObject {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let Some(bounds) = self.object.find_bounds(state, self.inner) else {
            self.highlight = Some(YankHighlight::hidden());
            return ExecuteResult::Skipped;
        };
        // An end on a line separator selects up to the last grapheme
        let end = state.clamp(bounds.end, Mode::Normal);
        state.mode = Mode::Visual;
        state.visual_anchor = Some(bounds.start);
        state.cursor = end;
        self.highlight = Some(YankHighlight {
            start: bounds.start,
            end,
            linewise: false,
            show: true,
        });
        ExecuteResult::Executed
    }

    fn keys(&self) -> &[&'static str] {
        self.keys
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn id(&self) -> &'static str {
        "select_text_object"
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::ModeEntry
    }

    fn yank_highlight(&self) -> Option<YankHighlight> {
        self.highlight
    }
}
