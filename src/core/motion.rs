//! Cursor motion algorithms.
//!
//! Motions are pure: they compute a target [`Position`] from the state and
//! never mutate it. All arithmetic is over grapheme indices, so a target can
//! never land inside a cluster.

use crate::core::buffer::Position;
use crate::core::mode::Mode;
use crate::core::state::EditorState;
use crate::core::utf8;

/// Character classes for word motions and word text objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Blank,
    Word,
    Punct,
}

/// Classify a grapheme. With `big` set (WORD semantics) there are only two
/// classes: blank and everything else.
pub fn char_class(g: &str, big: bool) -> CharClass {
    if utf8::is_blank(g) {
        return CharClass::Blank;
    }
    if big {
        return CharClass::Word;
    }
    match g.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' || !c.is_ascii() => CharClass::Word,
        _ => CharClass::Punct,
    }
}

fn classes(line: &str, big: bool) -> Vec<CharClass> {
    utf8::graphemes(line)
        .into_iter()
        .map(|g| char_class(g, big))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    DisplayUp,
    DisplayDown,
    WordForward,
    BigWordForward,
    WordBackward,
    BigWordBackward,
    WordEnd,
    BigWordEnd,
    LineStart,
    FirstNonBlank,
    LineEnd,
    BufferTop,
    BufferBottom,
}

impl Motion {
    /// Motions that clamp against the preferred column
    pub fn uses_preferred_column(self) -> bool {
        matches!(
            self,
            Motion::Up | Motion::Down | Motion::BufferTop | Motion::BufferBottom
        )
    }

    /// Where the cursor goes from `state.cursor` when moving in `mode`
    pub fn target(self, state: &EditorState, mode: Mode) -> Position {
        let pos = state.cursor;
        let target = match self {
            Motion::Left => Position::new(pos.row, pos.col.saturating_sub(1)),
            Motion::Right => Position::new(pos.row, pos.col + 1),
            Motion::Up => vertical(state, pos.row.saturating_sub(1), mode),
            Motion::Down => vertical(state, (pos.row + 1).min(state.last_row()), mode),
            Motion::DisplayUp => display_row(state, pos, false),
            Motion::DisplayDown => display_row(state, pos, true),
            Motion::WordForward => word_forward(state, pos, false),
            Motion::BigWordForward => word_forward(state, pos, true),
            Motion::WordBackward => word_backward(state, pos, false),
            Motion::BigWordBackward => word_backward(state, pos, true),
            Motion::WordEnd => word_end(state, pos, false),
            Motion::BigWordEnd => word_end(state, pos, true),
            Motion::LineStart => Position::new(pos.row, 0),
            Motion::FirstNonBlank => Position::new(pos.row, state.first_non_blank(pos.row)),
            Motion::LineEnd => {
                let len = state.line_len(pos.row);
                let col = if mode.allows_append_column() { len } else { len.saturating_sub(1) };
                Position::new(pos.row, col)
            }
            Motion::BufferTop => vertical(state, 0, mode),
            Motion::BufferBottom => vertical(state, state.last_row(), mode),
        };
        state.clamp(target, mode)
    }
}

/// Same-column move to `row`, bounded by the preferred column
fn vertical(state: &EditorState, row: usize, mode: Mode) -> Position {
    let col = state.preferred_col.min(state.max_col(row, mode));
    Position::new(row, col)
}

/// `w`/`W`
pub fn word_forward(state: &EditorState, pos: Position, big: bool) -> Position {
    let cls = classes(&state.line(pos.row), big);
    let n = cls.len();
    let next_line = || {
        if pos.row < state.last_row() {
            Position::new(pos.row + 1, state.first_non_blank(pos.row + 1))
        } else {
            Position::new(pos.row, n.saturating_sub(1))
        }
    };

    if n == 0 || pos.col + 1 >= n {
        return next_line();
    }

    let mut i = pos.col;
    let start_class = cls[i];
    if start_class != CharClass::Blank {
        while i < n && cls[i] == start_class {
            i += 1;
        }
    }
    while i < n && cls[i] == CharClass::Blank {
        i += 1;
    }
    if i < n {
        return Position::new(pos.row, i);
    }

    // No further word start on this line
    if cls[pos.col..].iter().all(|c| *c == CharClass::Blank) {
        next_line()
    } else {
        Position::new(pos.row, n - 1)
    }
}

/// `b`/`B`
pub fn word_backward(state: &EditorState, pos: Position, big: bool) -> Position {
    let prev_line_end = || {
        if pos.row > 0 {
            Position::new(pos.row - 1, state.line_len(pos.row - 1).saturating_sub(1))
        } else {
            Position::new(0, 0)
        }
    };

    let cls = classes(&state.line(pos.row), big);
    let col = pos.col.min(cls.len());
    if col == 0 {
        return prev_line_end();
    }

    let mut i = col - 1;
    while i > 0 && cls[i] == CharClass::Blank {
        i -= 1;
    }
    if cls[i] == CharClass::Blank {
        return prev_line_end();
    }
    let run = cls[i];
    while i > 0 && cls[i - 1] == run {
        i -= 1;
    }
    Position::new(pos.row, i)
}

/// `e`/`E`
pub fn word_end(state: &EditorState, pos: Position, big: bool) -> Position {
    let mut row = pos.row;
    let mut cls = classes(&state.line(row), big);
    let mut i = pos.col;

    // Inside a run that continues: go to its end
    if i + 1 < cls.len() && cls[i] != CharClass::Blank && cls[i + 1] == cls[i] {
        while i + 1 < cls.len() && cls[i + 1] == cls[i] {
            i += 1;
        }
        return Position::new(row, i);
    }

    // Otherwise find the next run, crossing lines, and go to its end
    i += 1;
    loop {
        if i >= cls.len() {
            if row >= state.last_row() {
                return pos;
            }
            row += 1;
            cls = classes(&state.line(row), big);
            i = 0;
            continue;
        }
        if cls[i] != CharClass::Blank {
            break;
        }
        i += 1;
    }
    while i + 1 < cls.len() && cls[i + 1] == cls[i] {
        i += 1;
    }
    Position::new(row, i)
}

/// Last grapheme of the non-blank run under `pos`, if the cursor is on one
pub fn run_end(state: &EditorState, pos: Position, big: bool) -> Option<Position> {
    let cls = classes(&state.line(pos.row), big);
    let run = *cls.get(pos.col)?;
    if run == CharClass::Blank {
        return None;
    }
    let mut i = pos.col;
    while i + 1 < cls.len() && cls[i + 1] == run {
        i += 1;
    }
    Some(Position::new(pos.row, i))
}

/// Exclusive end for `dw`: the next word start on the same line, or the line
/// end when the cursor is on the final word. Operators never cross a line
/// boundary with `w`.
pub fn word_forward_on_line(state: &EditorState, pos: Position, big: bool) -> Position {
    let cls = classes(&state.line(pos.row), big);
    let n = cls.len();
    let mut i = pos.col.min(n);
    if i < n {
        let start_class = cls[i];
        if start_class != CharClass::Blank {
            while i < n && cls[i] == start_class {
                i += 1;
            }
        }
        while i < n && cls[i] == CharClass::Blank {
            i += 1;
        }
    }
    Position::new(pos.row, i)
}

/// `gj`/`gk`: move by soft-wrapped display row, keeping the display offset
fn display_row(state: &EditorState, pos: Position, down: bool) -> Position {
    if state.width == 0 {
        let row = if down {
            (pos.row + 1).min(state.last_row())
        } else {
            pos.row.saturating_sub(1)
        };
        return Position::new(row, pos.col);
    }

    let line = state.line(pos.row);
    let starts = utf8::wrap_segments(&line, state.width, state.tab_width);
    let segment = starts.iter().rposition(|s| *s <= pos.col).unwrap_or(0);
    let seg_start = starts[segment];
    let offset = utf8::visual_width_up_to(&line, pos.col, state.tab_width)
        - utf8::visual_width_up_to(&line, seg_start, state.tab_width);

    let (row, target_segment) = if down {
        if segment + 1 < starts.len() {
            (pos.row, segment + 1)
        } else if pos.row < state.last_row() {
            (pos.row + 1, 0)
        } else {
            return pos;
        }
    } else if segment > 0 {
        (pos.row, segment - 1)
    } else if pos.row > 0 {
        let prev = state.line(pos.row - 1);
        let prev_starts = utf8::wrap_segments(&prev, state.width, state.tab_width);
        (pos.row - 1, prev_starts.len() - 1)
    } else {
        return pos;
    };

    let text = state.line(row);
    let row_starts = utf8::wrap_segments(&text, state.width, state.tab_width);
    let from = row_starts[target_segment];
    let to = row_starts
        .get(target_segment + 1)
        .copied()
        .unwrap_or_else(|| utf8::grapheme_count(&text));
    let segment_text = utf8::slice_by_graphemes(&text, from, to);
    let within = utf8::grapheme_index_from_visual_x(segment_text, offset, state.tab_width);
    let last_in_segment = to.saturating_sub(from).saturating_sub(1);
    Position::new(row, from + within.min(last_in_segment))
}
