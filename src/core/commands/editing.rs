//! Basic text editing commands (insert, delete, replace, join)

use crate::core::buffer::Position;
use crate::core::command::{Command, CommandFamily, ExecuteResult, Recorded};
use crate::core::error::EditError;
use crate::core::mode::Mode;
use crate::core::state::EditorState;
use crate::core::utf8;

/// Delete the grapheme under the cursor (`x`, `<delete>` in Normal mode).
/// Deleting the last grapheme of a line moves the cursor back one.
#[derive(Debug, Clone, Default)]
pub struct DeleteChar {
    recorded: Recorded,
    deleted: Option<String>,
}

impl DeleteChar {
    const ID: &'static str = "delete_char";

    /// The cluster removed by the first execution
    pub fn deleted(&self) -> Option<&str> {
        self.deleted.as_deref()
    }
}

impl Command for DeleteChar {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let deleted = &mut self.deleted;
        self.recorded.run(Self::ID, state, |state, group| {
            let Position { row, col } = state.cursor;
            let len = state.line_len(row);
            if col >= len {
                return Ok(false);
            }
            let text = state.delete_range(
                Position::new(row, col),
                Position::new(row, col + 1),
                group,
            )?;
            state.register.store(text.clone(), false);
            *deleted = Some(text);
            if col + 1 == len && col > 0 {
                state.cursor.col = col - 1;
            }
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        self.recorded.undo(Self::ID, state)
    }

    fn keys(&self) -> &[&'static str] {
        &["x", "<delete>"]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        Self::ID
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Edit
    }
}

/// `<backspace>` in Insert mode. At column 0 it joins with the previous line,
/// leaving `"\n"` in the register.
#[derive(Debug, Clone, Default)]
pub struct Backspace {
    recorded: Recorded,
}

impl Backspace {
    const ID: &'static str = "backspace";
}

impl Command for Backspace {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        self.recorded.run(Self::ID, state, |state, group| {
            let Position { row, col } = state.cursor;
            let col = col.min(state.line_len(row));
            let text = if col > 0 {
                let text =
                    state.delete_range(Position::new(row, col - 1), Position::new(row, col), group)?;
                state.cursor = Position::new(row, col - 1);
                text
            } else if row > 0 {
                let prev_len = state.line_len(row - 1);
                let text =
                    state.delete_range(Position::new(row - 1, prev_len), Position::new(row, 0), group)?;
                state.cursor = Position::new(row - 1, prev_len);
                text
            } else {
                return Ok(false);
            };
            state.register.store(text, false);
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        self.recorded.undo(Self::ID, state)
    }

    fn keys(&self) -> &[&'static str] {
        &["<backspace>"]
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn id(&self) -> &'static str {
        Self::ID
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Edit
    }
}

/// `<delete>` in Insert mode. At the end of a line it pulls the next line up.
#[derive(Debug, Clone, Default)]
pub struct DeleteKey {
    recorded: Recorded,
}

impl DeleteKey {
    const ID: &'static str = "delete_key";
}

impl Command for DeleteKey {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        self.recorded.run(Self::ID, state, |state, group| {
            let Position { row, col } = state.cursor;
            let len = state.line_len(row);
            let text = if col < len {
                state.delete_range(Position::new(row, col), Position::new(row, col + 1), group)?
            } else if row < state.last_row() {
                let text =
                    state.delete_range(Position::new(row, len), Position::new(row + 1, 0), group)?;
                state.cursor = Position::new(row, len);
                text
            } else {
                return Ok(false);
            };
            state.register.store(text, false);
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        self.recorded.undo(Self::ID, state)
    }

    fn keys(&self) -> &[&'static str] {
        &["<delete>"]
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn id(&self) -> &'static str {
        Self::ID
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Edit
    }
}

/// Insert typed text at the cursor. `"\n"` splits the line.
#[derive(Debug, Clone)]
pub struct InsertText {
    text: String,
    recorded: Recorded,
}

impl InsertText {
    const ID: &'static str = "insert_text";

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            recorded: Recorded::default(),
        }
    }
}

impl Command for InsertText {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let text = &self.text;
        self.recorded.run(Self::ID, state, |state, group| {
            if text.is_empty() {
                return Ok(false);
            }
            let at = state.clamp(state.cursor, Mode::Insert);
            state.cursor = state.insert_text(at, text, group)?;
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        self.recorded.undo(Self::ID, state)
    }

    fn keys(&self) -> &[&'static str] {
        &[]
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn id(&self) -> &'static str {
        Self::ID
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Edit
    }
}

/// Readline-style kills: `<ctrl+u>` to line start, `<ctrl+k>` to line end
#[derive(Debug, Clone)]
pub struct KillLine {
    to_end: bool,
    recorded: Recorded,
}

impl KillLine {
    pub fn new(to_end: bool) -> Self {
        Self {
            to_end,
            recorded: Recorded::default(),
        }
    }
}

impl Command for KillLine {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let (id, to_end) = (self.id(), self.to_end);
        self.recorded.run(id, state, |state, group| {
            let Position { row, col } = state.cursor;
            let len = state.line_len(row);
            let col = col.min(len);
            let (start, end) = if to_end { (col, len) } else { (0, col) };
            if start == end {
                return Ok(false);
            }
            let text = state.delete_range(Position::new(row, start), Position::new(row, end), group)?;
            state.register.store(text, false);
            state.cursor = Position::new(row, start);
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        let id = self.id();
        self.recorded.undo(id, state)
    }

    fn keys(&self) -> &[&'static str] {
        if self.to_end { &["<ctrl+k>"] } else { &["<ctrl+u>"] }
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn id(&self) -> &'static str {
        if self.to_end {
            "kill_to_line_end"
        } else {
            "kill_to_line_start"
        }
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Edit
    }
}

/// `r{char}`: overwrite the grapheme under the cursor
#[derive(Debug, Clone)]
pub struct ReplaceChar {
    with: String,
    recorded: Recorded,
}

impl ReplaceChar {
    const ID: &'static str = "replace_char";

    pub fn new(with: impl Into<String>) -> Self {
        Self {
            with: with.into(),
            recorded: Recorded::default(),
        }
    }
}

impl Command for ReplaceChar {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let with = &self.with;
        self.recorded.run(Self::ID, state, |state, group| {
            let Position { row, col } = state.cursor;
            if col >= state.line_len(row) {
                return Ok(false);
            }
            state.delete_range(Position::new(row, col), Position::new(row, col + 1), group)?;
            state.insert_text(Position::new(row, col), with, group)?;
            state.cursor = Position::new(row, col);
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        self.recorded.undo(Self::ID, state)
    }

    fn keys(&self) -> &[&'static str] {
        &["r"]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        Self::ID
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Edit
    }
}

/// Typing in Replace mode: overwrite in place, or append past the line end
#[derive(Debug, Clone)]
pub struct ReplaceInput {
    text: String,
    recorded: Recorded,
}

impl ReplaceInput {
    const ID: &'static str = "replace_input";

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            recorded: Recorded::default(),
        }
    }
}

impl Command for ReplaceInput {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        let text = &self.text;
        self.recorded.run(Self::ID, state, |state, group| {
            let Position { row, col } = state.cursor;
            let col = col.min(state.line_len(row));
            if col < state.line_len(row) {
                state.delete_range(Position::new(row, col), Position::new(row, col + 1), group)?;
            }
            state.insert_text(Position::new(row, col), text, group)?;
            state.cursor = Position::new(row, col + 1);
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        self.recorded.undo(Self::ID, state)
    }

    fn keys(&self) -> &[&'static str] {
        &[]
    }

    fn mode(&self) -> Mode {
        Mode::Replace
    }

    fn id(&self) -> &'static str {
        Self::ID
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Edit
    }
}

/// `J`: join the next line onto this one with a single space
#[derive(Debug, Clone, Default)]
pub struct JoinLines {
    recorded: Recorded,
}

impl JoinLines {
    const ID: &'static str = "join_lines";
}

impl Command for JoinLines {
    fn execute(&mut self, state: &mut EditorState) -> ExecuteResult {
        self.recorded.run(Self::ID, state, |state, group| {
            let row = state.cursor.row;
            if row >= state.last_row() {
                return Ok(false);
            }
            let len = state.line_len(row);
            let next = state.line(row + 1);
            let leading = utf8::graphemes(&next)
                .iter()
                .take_while(|g| utf8::is_blank(g))
                .count();
            let next_is_blank = leading == utf8::grapheme_count(&next);

            state.delete_range(Position::new(row, len), Position::new(row + 1, leading), group)?;
            if len > 0 && !next_is_blank {
                state.insert_text(Position::new(row, len), " ", group)?;
            }
            state.cursor = Position::new(row, len);
            Ok(true)
        })
    }

    fn undo(&mut self, state: &mut EditorState) -> Result<(), EditError> {
        self.recorded.undo(Self::ID, state)
    }

    fn keys(&self) -> &[&'static str] {
        &["J"]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn id(&self) -> &'static str {
        Self::ID
    }

    fn family(&self) -> CommandFamily {
        CommandFamily::Edit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(content: &str, row: usize, col: usize) -> EditorState {
        let mut state = EditorState::from_content(content);
        state.cursor = Position::new(row, col);
        state
    }

    #[test]
    fn test_delete_char_and_undo() {
        let mut s = state("hello", 0, 2);
        let mut x = DeleteChar::default();
        assert_eq!(x.execute(&mut s), ExecuteResult::Executed);
        assert_eq!(s.buffer.to_string(), "helo");
        assert_eq!(x.deleted(), Some("l"));
        assert_eq!(s.register.text(), "l");

        x.undo(&mut s).unwrap();
        assert_eq!(s.buffer.to_string(), "hello");
        assert_eq!(s.cursor, Position::new(0, 2));
    }

    #[test]
    fn test_delete_char_removes_whole_cluster() {
        let mut s = state("h😀llo", 0, 1);
        let mut x = DeleteChar::default();
        x.execute(&mut s);
        assert_eq!(s.buffer.to_string(), "hllo");
        assert_eq!(x.deleted(), Some("😀"));
        assert_eq!(s.cursor, Position::new(0, 1));
    }

    #[test]
    fn test_delete_last_char_steps_back() {
        let mut s = state("abc", 0, 2);
        DeleteChar::default().execute(&mut s);
        assert_eq!(s.cursor, Position::new(0, 1));

        let mut empty = state("", 0, 0);
        assert_eq!(
            DeleteChar::default().execute(&mut empty),
            ExecuteResult::Skipped
        );
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut s = state("ab\ncd", 1, 0);
        s.mode = Mode::Insert;
        let mut bs = Backspace::default();
        assert_eq!(bs.execute(&mut s), ExecuteResult::Executed);
        assert_eq!(s.buffer.to_string(), "abcd");
        assert_eq!(s.cursor, Position::new(0, 2));
        assert_eq!(s.register.text(), "\n");
        bs.undo(&mut s).unwrap();
        assert_eq!(s.buffer.to_string(), "ab\ncd");
        assert_eq!(s.cursor, Position::new(1, 0));

        let mut start = state("ab", 0, 0);
        assert_eq!(Backspace::default().execute(&mut start), ExecuteResult::Skipped);
        assert!(start.register.is_empty());
    }

    #[test]
    fn test_insert_deletes_fill_register() {
        let mut s = state("ab\ncd", 1, 2);
        s.mode = Mode::Insert;
        assert_eq!(Backspace::default().execute(&mut s), ExecuteResult::Executed);
        assert_eq!(s.buffer.to_string(), "ab\nc");
        assert_eq!(s.register.text(), "c");
        assert!(!s.register.is_linewise());

        let mut s = state("h😀llo", 0, 1);
        s.mode = Mode::Insert;
        assert_eq!(DeleteKey::default().execute(&mut s), ExecuteResult::Executed);
        assert_eq!(s.buffer.to_string(), "hllo");
        assert_eq!(s.register.text(), "😀");
    }

    #[test]
    fn test_delete_key_at_edges() {
        let mut s = state("ab\ncd", 0, 2);
        s.mode = Mode::Insert;
        assert_eq!(DeleteKey::default().execute(&mut s), ExecuteResult::Executed);
        assert_eq!(s.buffer.to_string(), "abcd");
        assert_eq!(s.register.text(), "\n");

        let mut end = state("ab", 0, 2);
        end.mode = Mode::Insert;
        assert_eq!(DeleteKey::default().execute(&mut end), ExecuteResult::Skipped);
        assert!(end.register.is_empty());
    }

    #[test]
    fn test_insert_newline_splits() {
        let mut s = state("hello", 0, 2);
        s.mode = Mode::Insert;
        let mut enter = InsertText::new("\n");
        enter.execute(&mut s);
        assert_eq!(s.buffer.lines(), vec!["he", "llo"]);
        assert_eq!(s.cursor, Position::new(1, 0));
        enter.undo(&mut s).unwrap();
        assert_eq!(s.buffer.to_string(), "hello");
    }

    #[test]
    fn test_insert_combining_mark_merges() {
        let mut s = state("e", 0, 1);
        s.mode = Mode::Insert;
        InsertText::new("\u{0301}").execute(&mut s);
        assert_eq!(s.buffer.line_len(0), 1);
        assert_eq!(s.cursor, Position::new(0, 1));
    }

    #[test]
    fn test_kill_line() {
        let mut s = state("hello world", 0, 6);
        s.mode = Mode::Insert;
        let mut kill = KillLine::new(false);
        assert_eq!(kill.execute(&mut s), ExecuteResult::Executed);
        assert_eq!(s.buffer.to_string(), "world");
        assert_eq!(s.register.text(), "hello ");
        assert_eq!(s.cursor, Position::new(0, 0));
        assert_eq!(KillLine::new(false).execute(&mut s), ExecuteResult::Skipped);

        let mut kill_end = KillLine::new(true);
        kill_end.execute(&mut s);
        assert_eq!(s.buffer.to_string(), "");
        kill_end.undo(&mut s).unwrap();
        assert_eq!(s.buffer.to_string(), "world");
    }

    #[test]
    fn test_replace_char() {
        let mut s = state("h😀llo", 0, 1);
        let mut r = ReplaceChar::new("e");
        r.execute(&mut s);
        assert_eq!(s.buffer.to_string(), "hello");
        r.undo(&mut s).unwrap();
        assert_eq!(s.buffer.to_string(), "h😀llo");
    }

    #[test]
    fn test_replace_input_appends_at_end() {
        let mut s = state("ab", 0, 1);
        s.mode = Mode::Replace;
        ReplaceInput::new("X").execute(&mut s);
        ReplaceInput::new("Y").execute(&mut s);
        assert_eq!(s.buffer.to_string(), "aXY");
        assert_eq!(s.cursor, Position::new(0, 3));
    }

    #[test]
    fn test_join_lines() {
        let mut s = state("foo\n   bar\nbaz", 0, 1);
        let mut join = JoinLines::default();
        join.execute(&mut s);
        assert_eq!(s.buffer.lines(), vec!["foo bar", "baz"]);
        assert_eq!(s.cursor, Position::new(0, 3));
        join.undo(&mut s).unwrap();
        assert_eq!(s.buffer.lines(), vec!["foo", "   bar", "baz"]);

        let mut last = state("only", 0, 0);
        assert_eq!(JoinLines::default().execute(&mut last), ExecuteResult::Skipped);
    }
}
