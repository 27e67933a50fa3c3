use crate::core::input::Key;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Convert a crossterm key event into a key token, or `None` for events the
/// engine has no binding surface for (releases, function keys, media keys).
pub fn key_token(event: &KeyEvent) -> Option<String> {
    to_key(event).map(|key| key.to_string())
}

/// Convert a crossterm key event into the engine's key model
pub fn to_key(event: &KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    let key = match event.code {
        KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
        KeyCode::Char(c) => Key::Grapheme(c.to_string()),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_printable_keys_keep_case() {
        let token = key_token(&press(KeyCode::Char('V'), KeyModifiers::SHIFT));
        assert_eq!(token.as_deref(), Some("V"));
        let token = key_token(&press(KeyCode::Char('$'), KeyModifiers::NONE));
        assert_eq!(token.as_deref(), Some("$"));
    }

    #[test]
    fn test_control_and_named_keys() {
        let token = key_token(&press(KeyCode::Char('R'), KeyModifiers::CONTROL));
        assert_eq!(token.as_deref(), Some("<ctrl+r>"));
        let token = key_token(&press(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(token.as_deref(), Some("<escape>"));
        let token = key_token(&press(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(token.as_deref(), Some("<backspace>"));
    }

    #[test]
    fn test_unmapped_and_release_events() {
        assert_eq!(key_token(&press(KeyCode::F(5), KeyModifiers::NONE)), None);
        assert_eq!(key_token(&press(KeyCode::PageDown, KeyModifiers::NONE)), None);

        let mut release = press(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_token(&release), None);
    }
}
