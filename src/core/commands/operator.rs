//! Operator commands: `d`, `c` and `y` composed with a motion, a text object,
//! or a linewise span.
//!
//! The pending-operator registry builds these from `(operator, sequence)`
//! pairs such as `('d', "iw")` or `('c', "c")`.

use crate::core::buffer::{Buffer, Position};
use crate::core::command::{Command, CommandFamily, ExecuteResult, Recorded, YankHighlight};
use crate::core::error::EditError;
use crate::core::mode::Mode;
use crate::core::motion::{self, Motion};
use crate::core::selection::{TextRange, inclusive_end, joined_lines, linewise_range};
use crate::core::state::EditorState;
use crate::core::text_object::TextObject;
use crate::core::undo_group::UndoGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Delete,
    Change,
    Yank,
}

impl Operator {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'd' => Some(Operator::Delete),
            'c' => Some(Operator::Change),
            'y' => Some(Operator::Yank),
            _ => None,
        }
    }

    fn family(self) -> CommandFamily {
        match self {
            Operator::Delete => CommandFamily::Edit,
            Operator::Change => CommandFamily::Change,
            Operator::Yank => CommandFamily::Yank,
        }
    }
}

/// Last grapheme position covered by a half-open range
fn last_covered(buffer: &Buffer, range: &TextRange) -> Position {
    if range.end.col > 0 {
        Position::new(range.end.row, range.end.col - 1)
    } else if range.end.row > 0 {
        let row = range.end.row - 1;
        Position::new(row, buffer.line_len(row))
    } else {
        range.start
    }
}

/// What a characterwise operator acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Motion(Motion),
    Object { object: TextObject, inner: bool },
}

/// Span for `op` + a motion from the cursor, or `None` when there is nothing
/// to act on.
fn motion_range(state: &EditorState, op: Operator, kind: Motion) -> Option<TextRange> {
    let cursor = state.clamp(state.cursor, Mode::Normal);
    let len = state.line_len(cursor.row);
    let range = match kind {
        Motion::WordForward | Motion::BigWordForward => {
            if len == 0 {
                return None;
            }
            let big = kind == Motion::BigWordForward;
            // `cw` on a word changes to the end of that word only
            let change_end = match op {
                Operator::Change => motion::run_end(state, cursor, big),
                _ => None,
            };
            let end = match change_end {
                Some(end) => Position::new(end.row, end.col + 1),
                None => motion::word_forward_on_line(state, cursor, big),
            };
            TextRange::new(cursor, end)
        }
        Motion::WordEnd | Motion::BigWordEnd => {
            let target = motion::word_end(state, cursor, kind == Motion::BigWordEnd);
            if len == 0 && target == cursor {
                return None;
            }
            TextRange::new(cursor, inclusive_end(&state.buffer, target))
        }
        Motion::LineEnd => TextRange::new(cursor, Position::new(cursor.row, len)),
        Motion::Right => TextRange::new(cursor, Position::new(cursor.row, (cursor.col + 1).min(len))),
        Motion::Left
        | Motion::WordBackward
        | Motion::BigWordBackward
        | Motion::LineStart
        | Motion::FirstNonBlank => {
            let target = match kind {
                Motion::Left => Position::new(cursor.row, cursor.col.saturating_sub(1)),
                Motion::WordBackward => motion::word_backward(state, cursor, false),
                Motion::BigWordBackward => motion::word_backward(state, cursor, true),
                Motion::LineStart => Position::new(cursor.row, 0),
                _ => Position::new(cursor.row, state.first_non_blank(cursor.row)),
            };
            TextRange::new(target.min(cursor), target.max(cursor))
        }
        Motion::Up
        | Motion::Down
        | Motion::DisplayUp
        | Motion::DisplayDown
        | Motion::BufferTop
        | Motion::BufferBottom => return None,
    };
    (!range.is_empty()).then_some(range)
}

/// Apply `op` to a characterwise range and leave the cursor at its start
fn apply_charwise(
    state: &mut EditorState,
    op: Operator,
    range: TextRange,
    group: &mut UndoGroup,
) -> Result<(), EditError> {
    match op {
        Operator::Yank => {
            let text = state.text_range(range.start, range.end)?;
            state.register.store(text, false);
        }
        Operator::Delete | Operator::Change => {
            let text = state.delete_range(range.start, range.end, group)?;
            state.register.store(text, false);
            if op == Operator::Change {
                state.mode = Mode::Insert;
            }
        }
    }
    state.cursor = range.start;
    Ok(())
}

/// `d`/`c`/`y` + motion or text object
#[derive(Debug, Clone)]
pub struct OperatorCommand {
    op: Operator,
    target: Target,
    keys: &'static [&'static str],
    recorded: Recorded,
    highlight: Option<YankHighlight>,
}

impl OperatorCommand {
    pub fn new(op: Operator, target: Target, keys: &'static [&'static str]) -> Self {
        Self {
            op,
            target,
            keys,
            recorded: Recorded::default(),
            highlight: None,
        }
    }

    fn range(&self, state: &EditorState) -> Option<TextRange> {
        match self.target {
            Target::Motion(motion) => motion_range(state, self.op, motion),
            Target::Object { object, inner } => object
                .find_bounds(state, inner)
                .map(|bounds| bounds.range(&state.buffer))
                .filter(|range| !range.is_empty()),
        }
    }

    fn execute_yank(&mut self, state: &mut EditorState) -> ExecuteResult {
        let Some(range) = self.range(state) else {
            self.highlight = Some(YankHighlight::hidden());
            return ExecuteResult::Skipped;
        };
        let mut scratch = UndoGroup::new(state.cursor);
        if let Err(err) = apply_charwise(state, Operator::Yank, range, &mut scratch) {
            log::warn!("{}: {err}", self.id());
            self.highlight = Some(YankHighlight::hidden());
            return ExecuteResult::Skipped;
        }
        self.highlight = Some(YankHighlight {
            start: range.start,
            end: last_covered(&state.buffer, &range),
            linewise: false,
            show: true,
        });
        ExecuteResult::Executed
    }
}

impl Command for OperatorCommand {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        if self.op == Operator::Yank {
            return self.execute_yank(state);
        }
        let range = if self.recorded.is_executed() {
            None
        } else {
            match self.range(state) {
                Some(range) => Some(range),
                None => return ExecuteResult::Skipped,
            }
        };
        let (id, op) = (self.id(), self.op);
        self.recorded.run(id, state, |state, group| {
            let Some(range) = range else {
                return Ok(false);
            };
            apply_charwise(state, op, range, group)?;
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
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        match (self.op, self.target) {
            (Operator::Delete, Target::Motion(_)) => "delete_motion",
            (Operator::Delete, Target::Object { .. }) => "delete_text_object",
            (Operator::Change, Target::Motion(_)) => "change_motion",
            (Operator::Change, Target::Object { .. }) => "change_text_object",
            (Operator::Yank, Target::Motion(_)) => "yank_motion",
            (Operator::Yank, Target::Object { .. }) => "yank_text_object",
        }
    }

    fn family(&self) -> CommandFamily {
        self.op.family()
    }

    fn yank_highlight(&self) -> Option<YankHighlight> {
        self.highlight
    }
}

// =============================================================================
// LINEWISE
// =============================================================================

/// Rows a linewise operator covers, relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSpan {
    /// `dd`, `cc`, `yy`
    Current,
    /// `dj`
    Down,
    /// `dk`
    Up,
    /// `dgg`
    ToTop,
    /// `dG`
    ToBottom,
}

impl LineSpan {
    fn rows(self, state: &EditorState) -> Option<(usize, usize)> {
        let row = state.cursor.row.min(state.last_row());
        match self {
            LineSpan::Current => Some((row, row)),
            LineSpan::Down => (row < state.last_row()).then_some((row, row + 1)),
            LineSpan::Up => (row > 0).then(|| (row - 1, row)),
            LineSpan::ToTop => Some((0, row)),
            LineSpan::ToBottom => Some((row, state.last_row())),
        }
    }
}

/// Linewise `d`/`c`/`y`. The register receives the covered lines joined by
/// `\n` and flagged linewise.
#[derive(Debug, Clone)]
pub struct LinewiseCommand {
    op: Operator,
    span: LineSpan,
    keys: &'static [&'static str],
    recorded: Recorded,
    highlight: Option<YankHighlight>,
}

impl LinewiseCommand {
    pub fn new(op: Operator, span: LineSpan, keys: &'static [&'static str]) -> Self {
        Self {
            op,
            span,
            keys,
            recorded: Recorded::default(),
            highlight: None,
        }
    }

    fn execute_yank(&mut self, state: &mut EditorState) -> ExecuteResult {
        let Some((first, last)) = self.span.rows(state) else {
            self.highlight = Some(YankHighlight::hidden());
            return ExecuteResult::Skipped;
        };
        state
            .register
            .store(joined_lines(&state.buffer, first, last), true);
        state.cursor.row = first;
        self.highlight = Some(YankHighlight {
            start: Position::new(first, 0),
            end: Position::new(last, state.line_len(last).saturating_sub(1)),
            linewise: true,
            show: true,
        });
        ExecuteResult::Executed
    }
}

impl Command for LinewiseCommand {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        if self.op == Operator::Yank {
            return self.execute_yank(state);
        }
        let (id, op, span) = (self.id(), self.op, self.span);
        self.recorded.run(id, state, |state, group| {
            let Some((first, last)) = span.rows(state) else {
                return Ok(false);
            };
            let text = joined_lines(&state.buffer, first, last);
            if op == Operator::Change {
                let end = Position::new(last, state.line_len(last));
                state.delete_range(Position::new(first, 0), end, group)?;
                state.register.store(text, true);
                state.cursor = Position::new(first, 0);
                state.mode = Mode::Insert;
            } else {
                let range = linewise_range(&state.buffer, first, last);
                state.delete_range(range.start, range.end, group)?;
                state.register.store(text, true);
                let row = first.min(state.last_row());
                state.cursor = Position::new(row, state.first_non_blank(row));
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
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        match (self.op, self.span) {
            (Operator::Delete, LineSpan::Current) => "delete_line",
            (Operator::Delete, LineSpan::Down) => "delete_lines_down",
            (Operator::Delete, LineSpan::Up) => "delete_lines_up",
            (Operator::Delete, LineSpan::ToTop) => "delete_to_top",
            (Operator::Delete, LineSpan::ToBottom) => "delete_to_bottom",
            (Operator::Change, LineSpan::Current) => "change_line",
            (Operator::Change, LineSpan::Down) => "change_lines_down",
            (Operator::Change, LineSpan::Up) => "change_lines_up",
            (Operator::Change, LineSpan::ToTop) => "change_to_top",
            (Operator::Change, LineSpan::ToBottom) => "change_to_bottom",
            (Operator::Yank, LineSpan::Current) => "yank_line",
            (Operator::Yank, LineSpan::Down) => "yank_lines_down",
            (Operator::Yank, LineSpan::Up) => "yank_lines_up",
            (Operator::Yank, LineSpan::ToTop) => "yank_to_top",
            (Operator::Yank, LineSpan::ToBottom) => "yank_to_bottom",
        }
    }

    fn family(&self) -> CommandFamily {
        self.op.family()
    }

    fn yank_highlight(&self) -> Option<YankHighlight> {
        self.highlight
    }
}
