use std::fmt;
use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

use crate::core::error::EditError;

/// A single key as the dispatcher sees it.
///
/// Printable keys are carried as one grapheme cluster, so `"😀"` and
/// `"e\u{301}"` are single keys. Named keys print as `<name>` tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Grapheme(String),
    Ctrl(char),
    Esc,
    Enter,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Canonical token for any accepted spelling (`<esc>` -> `<escape>`)
    pub fn normalize(token: &str) -> Result<String, EditError> {
        token.parse::<Key>().map(|key| key.to_string())
    }

    /// The text this key types, if it is printable
    pub fn grapheme(&self) -> Option<&str> {
        match self {
            Key::Grapheme(g) => Some(g),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Grapheme(g) => write!(f, "{}", g),
            Key::Ctrl(c) => write!(f, "<ctrl+{}>", c),
            Key::Esc => write!(f, "<escape>"),
            Key::Enter => write!(f, "<enter>"),
            Key::Backspace => write!(f, "<backspace>"),
            Key::Tab => write!(f, "<tab>"),
            Key::Delete => write!(f, "<delete>"),
            Key::Home => write!(f, "<home>"),
            Key::End => write!(f, "<end>"),
            Key::Up => write!(f, "<up>"),
            Key::Down => write!(f, "<down>"),
            Key::Left => write!(f, "<left>"),
            Key::Right => write!(f, "<right>"),
        }
    }
}

impl FromStr for Key {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut graphemes = s.graphemes(true);
        if let (Some(g), None) = (graphemes.next(), graphemes.next()) {
            return Ok(Key::Grapheme(g.to_string()));
        }

        let unknown = || EditError::UnknownKey(s.to_string());
        let name = s
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .ok_or_else(unknown)?;

        // Ctrl notation: <ctrl+u> or <c-u>
        let lower = name.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("ctrl+").or_else(|| lower.strip_prefix("c-")) {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Key::Ctrl(c.to_ascii_lowercase())),
                _ => Err(unknown()),
            };
        }

        match lower.as_str() {
            "escape" | "esc" => Ok(Key::Esc),
            "enter" | "cr" | "return" => Ok(Key::Enter),
            "backspace" | "bs" => Ok(Key::Backspace),
            "tab" => Ok(Key::Tab),
            "delete" | "del" => Ok(Key::Delete),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            "space" => Ok(Key::Grapheme(" ".to_string())),
            _ => Err(unknown()),
        }
    }
}
