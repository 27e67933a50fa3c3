//! Text-object bounds finding: word, WORD, quoted string, bracket group.
//!
//! Bounds are grapheme positions with an inclusive `end`. An `end` whose
//! column equals the line length stands for that line's separator, which lets
//! a multi-line bracket interior be expressed without a special case.

use crate::core::buffer::{Buffer, Position};
use crate::core::motion::{CharClass, char_class};
use crate::core::selection::{TextRange, inclusive_end};
use crate::core::state::EditorState;
use crate::core::utf8;

/// Bracket kinds searched by the generic `b` object
pub const BRACKETS: [(&str, &str); 3] = [("(", ")"), ("[", "]"), ("{", "}")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextObject {
    Word,
    BigWord,
    /// `"` or `'`
    Quote(char),
    /// `None` searches every bracket kind and picks the innermost pair
    Bracket(Option<(char, char)>),
}

/// Inclusive bounds of a found text object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub start: Position,
    pub end: Position,
}

impl Bounds {
    /// Half-open span to operate on
    pub fn range(&self, buffer: &Buffer) -> TextRange {
        TextRange::new(self.start, inclusive_end(buffer, self.end))
    }
}

impl TextObject {
    /// Locate the object around the cursor. `None` means not found.
    pub fn find_bounds(&self, state: &EditorState, inner: bool) -> Option<Bounds> {
        match self {
            TextObject::Word => word_bounds(state, inner, false),
            TextObject::BigWord => word_bounds(state, inner, true),
            TextObject::Quote(q) => quote_bounds(state, inner, *q),
            TextObject::Bracket(kind) => bracket_bounds(state, inner, *kind),
        }
    }
}

// =============================================================================
// WORD / WORD
// =============================================================================

fn word_bounds(state: &EditorState, inner: bool, big: bool) -> Option<Bounds> {
    let pos = state.cursor;
    let cls: Vec<CharClass> = utf8::graphemes(&state.line(pos.row))
        .into_iter()
        .map(|g| char_class(g, big))
        .collect();
    let here = *cls.get(pos.col)?;
    if here == CharClass::Blank {
        return None;
    }

    let mut start = pos.col;
    while start > 0 && cls[start - 1] == here {
        start -= 1;
    }
    let mut end = pos.col;
    while end + 1 < cls.len() && cls[end + 1] == here {
        end += 1;
    }

    if !inner {
        if end + 1 < cls.len() && cls[end + 1] == CharClass::Blank {
            while end + 1 < cls.len() && cls[end + 1] == CharClass::Blank {
                end += 1;
            }
        } else {
            while start > 0 && cls[start - 1] == CharClass::Blank {
                start -= 1;
            }
        }
    }

    Some(Bounds {
        start: Position::new(pos.row, start),
        end: Position::new(pos.row, end),
    })
}

// =============================================================================
// QUOTES
// =============================================================================

/// Unescaped delimiter columns on a line. A delimiter preceded by an odd
/// number of consecutive backslashes is escaped.
fn quote_delimiters(graphemes: &[&str], quote: &str) -> Vec<usize> {
    let mut found = Vec::new();
    for (i, g) in graphemes.iter().enumerate() {
        if *g != quote {
            continue;
        }
        let backslashes = graphemes[..i]
            .iter()
            .rev()
            .take_while(|g| **g == "\\")
            .count();
        if backslashes % 2 == 0 {
            found.push(i);
        }
    }
    found
}

fn quote_bounds(state: &EditorState, inner: bool, quote: char) -> Option<Bounds> {
    let pos = state.cursor;
    let line = state.line(pos.row);
    let graphemes = utf8::graphemes(&line);
    let mut buf = [0u8; 4];
    let delimiters = quote_delimiters(&graphemes, quote.encode_utf8(&mut buf));

    let (open, close) = delimiters
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .find(|(open, close)| *open <= pos.col && pos.col <= *close)?;

    if inner {
        if close == open + 1 {
            return None;
        }
        Some(Bounds {
            start: Position::new(pos.row, open + 1),
            end: Position::new(pos.row, close - 1),
        })
    } else {
        Some(Bounds {
            start: Position::new(pos.row, open),
            end: Position::new(pos.row, close),
        })
    }
}

// =============================================================================
// BRACKETS
// =============================================================================

fn owned_graphemes(state: &EditorState, row: usize) -> Vec<String> {
    utf8::graphemes(&state.line(row))
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Nearest unmatched `open` strictly before `from`
fn scan_back(state: &EditorState, from: Position, open: &str, close: &str) -> Option<Position> {
    let mut depth = 0usize;
    let mut row = from.row;
    let mut line = owned_graphemes(state, row);
    let mut col = from.col.min(line.len());
    loop {
        while col > 0 {
            col -= 1;
            let g = line[col].as_str();
            if g == close {
                depth += 1;
            } else if g == open {
                if depth == 0 {
                    return Some(Position::new(row, col));
                }
                depth -= 1;
            }
        }
        if row == 0 {
            return None;
        }
        row -= 1;
        line = owned_graphemes(state, row);
        col = line.len();
    }
}

/// Nearest unmatched `close` at or after `from`
fn scan_forward(state: &EditorState, from: Position, open: &str, close: &str) -> Option<Position> {
    let mut depth = 0usize;
    let mut row = from.row;
    let mut col = from.col;
    loop {
        let line = owned_graphemes(state, row);
        while col < line.len() {
            let g = line[col].as_str();
            if g == open {
                depth += 1;
            } else if g == close {
                if depth == 0 {
                    return Some(Position::new(row, col));
                }
                depth -= 1;
            }
            col += 1;
        }
        if row >= state.last_row() {
            return None;
        }
        row += 1;
        col = 0;
    }
}

fn enclosing_pair(state: &EditorState, open: &str, close: &str) -> Option<(Position, Position)> {
    let pos = state.cursor;
    let here = utf8::grapheme_at(&state.line(pos.row), pos.col).map(str::to_string);
    match here.as_deref() {
        Some(g) if g == open => {
            let close_pos = scan_forward(state, Position::new(pos.row, pos.col + 1), open, close)?;
            Some((pos, close_pos))
        }
        Some(g) if g == close => Some((scan_back(state, pos, open, close)?, pos)),
        _ => {
            let open_pos = scan_back(state, pos, open, close)?;
            let close_pos = scan_forward(state, pos, open, close)?;
            Some((open_pos, close_pos))
        }
    }
}

fn bracket_bounds(state: &EditorState, inner: bool, kind: Option<(char, char)>) -> Option<Bounds> {
    let (open, close) = match kind {
        Some((o, c)) => {
            let (o, c) = (o.to_string(), c.to_string());
            enclosing_pair(state, &o, &c)?
        }
        None => BRACKETS
            .iter()
            .filter_map(|(o, c)| enclosing_pair(state, o, c))
            .max_by_key(|(open, _)| *open)?,
    };

    if !inner {
        return Some(Bounds {
            start: open,
            end: close,
        });
    }

    let start = Position::new(open.row, open.col + 1);
    if start >= close {
        return None;
    }
    let end = if close.col > 0 {
        Position::new(close.row, close.col - 1)
    } else {
        Position::new(close.row - 1, state.line_len(close.row - 1))
    };
    Some(Bounds { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(content: &str, row: usize, col: usize, obj: TextObject, inner: bool) -> Option<Bounds> {
        let mut state = EditorState::from_content(content);
        state.cursor = Position::new(row, col);
        obj.find_bounds(&state, inner)
    }

    fn span(r0: usize, c0: usize, r1: usize, c1: usize) -> Option<Bounds> {
        Some(Bounds {
            start: Position::new(r0, c0),
            end: Position::new(r1, c1),
        })
    }

    #[test]
    fn test_inner_and_around_word() {
        assert_eq!(find("hello world", 0, 2, TextObject::Word, true), span(0, 0, 0, 4));
        assert_eq!(find("hello world", 0, 2, TextObject::Word, false), span(0, 0, 0, 5));
        // Last word on the line takes the leading blanks instead
        assert_eq!(find("hello world", 0, 8, TextObject::Word, false), span(0, 5, 0, 10));
        assert_eq!(find("foo.bar", 0, 1, TextObject::Word, true), span(0, 0, 0, 2));
        assert_eq!(find("foo.bar", 0, 1, TextObject::BigWord, true), span(0, 0, 0, 6));
    }

    #[test]
    fn test_word_on_blank_not_found() {
        assert_eq!(find("a   b", 0, 2, TextObject::Word, true), None);
        assert_eq!(find("", 0, 0, TextObject::Word, false), None);
    }

    #[test]
    fn test_quotes() {
        let line = r#"say "hi there" now"#;
        assert_eq!(find(line, 0, 6, TextObject::Quote('"'), true), span(0, 5, 0, 12));
        assert_eq!(find(line, 0, 6, TextObject::Quote('"'), false), span(0, 4, 0, 13));
        // Cursor on the closing delimiter still counts
        assert_eq!(find(line, 0, 13, TextObject::Quote('"'), true), span(0, 5, 0, 12));
        // Outside any pair
        assert_eq!(find(line, 0, 1, TextObject::Quote('"'), true), None);
    }

    #[test]
    fn test_escaped_and_unterminated_quotes() {
        let line = r#"x = "a\"b" + 'c"#;
        assert_eq!(find(line, 0, 6, TextObject::Quote('"'), true), span(0, 5, 0, 8));
        assert_eq!(find(line, 0, 14, TextObject::Quote('\''), true), None);
        // Double backslash is not an escape
        let line = r#""a\\" b"#;
        assert_eq!(find(line, 0, 1, TextObject::Quote('"'), true), span(0, 1, 0, 3));
    }

    #[test]
    fn test_empty_quotes_inner_not_found() {
        assert_eq!(find(r#"x = """#, 0, 4, TextObject::Quote('"'), true), None);
        assert_eq!(find(r#"x = """#, 0, 4, TextObject::Quote('"'), false), span(0, 4, 0, 5));
    }

    #[test]
    fn test_brackets_pick_innermost() {
        let line = "f(a, [b, c], d)";
        assert_eq!(find(line, 0, 7, TextObject::Bracket(None), true), span(0, 6, 0, 9));
        assert_eq!(find(line, 0, 2, TextObject::Bracket(None), true), span(0, 2, 0, 13));
        assert_eq!(find(line, 0, 1, TextObject::Bracket(None), false), span(0, 1, 0, 14));
        assert_eq!(
            find(line, 0, 7, TextObject::Bracket(Some(('(', ')'))), true),
            span(0, 2, 0, 13)
        );
    }

    #[test]
    fn test_brackets_multiline_and_nested() {
        let text = "fn {\n  if (x) {}\n}";
        assert_eq!(find(text, 1, 2, TextObject::Bracket(None), true), span(0, 4, 1, 11));
        assert_eq!(find(text, 1, 2, TextObject::Bracket(None), false), span(0, 3, 2, 0));
        assert_eq!(find("foo(bar)baz", 0, 5, TextObject::Bracket(None), true), span(0, 4, 0, 6));
    }

    #[test]
    fn test_brackets_not_found() {
        assert_eq!(find("no brackets", 0, 3, TextObject::Bracket(None), true), None);
        assert_eq!(find("a () b", 0, 2, TextObject::Bracket(None), true), None);
        assert_eq!(find("a ) b", 0, 0, TextObject::Bracket(None), true), None);
    }

    #[test]
    fn test_bounds_range_covers_separator() {
        let state = EditorState::from_content("fn {\n  x\n}");
        let bounds = Bounds {
            start: Position::new(0, 4),
            end: Position::new(1, 3),
        };
        let range = bounds.range(&state.buffer);
        assert_eq!(range.end, Position::new(2, 0));
    }
}
