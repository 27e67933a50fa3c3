use crate::core::app::EditorApp;
use crate::core::command::ExecuteResult;
use crate::core::commands::editing::{InsertText, ReplaceInput};
use crate::core::commands::mode::EnterVisual;
use crate::core::input::Key;
use crate::core::keymap::Binding;
use crate::core::mode::Mode;
use crate::core::pending::{PendingOperator, Resolution};

/// Result of dispatching one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// A command ran and changed state
    Executed,
    /// A command ran but its preconditions were not met, or a pending
    /// sequence was cancelled
    Skipped,
    /// The key belongs to the host (e.g. `<ctrl+r>` with nothing to redo)
    PassThrough,
    /// An operator is waiting for more keys
    Pending,
    /// No binding for this key in the current mode
    NotHandled,
}

impl From<ExecuteResult> for DispatchResult {
    fn from(result: ExecuteResult) -> Self {
        match result {
            ExecuteResult::Executed => DispatchResult::Executed,
            ExecuteResult::Skipped => DispatchResult::Skipped,
            ExecuteResult::PassThrough => DispatchResult::PassThrough,
        }
    }
}

/// Re-dispatch after a `v` fallback replays at most a couple of keys; this
/// bounds it anyway.
const MAX_DISPATCH_DEPTH: usize = 8;

/// Key dispatcher for EditorApp (Command Pattern architecture)
///
/// A key either continues the pending operator, or is looked up in the
/// `(mode, key)` table. Printable keys with no binding type text in Insert
/// and Replace mode. All command logic lives in the `commands` modules.
pub fn dispatch(app: &mut EditorApp, token: &str) -> DispatchResult {
    if app.dispatch_depth > MAX_DISPATCH_DEPTH {
        log::warn!("dispatch depth exceeded at {token:?}");
        return DispatchResult::NotHandled;
    }
    app.dispatch_depth += 1;

    let result = dispatch_inner(app, token);

    app.dispatch_depth -= 1;
    result
}

fn dispatch_inner(app: &mut EditorApp, token: &str) -> DispatchResult {
    let key = match token.parse::<Key>() {
        Ok(key) => key,
        Err(err) => {
            log::debug!("{err}");
            return DispatchResult::NotHandled;
        }
    };
    let token = key.to_string();
    app.highlight = None;

    if let Some(pending) = app.pending.take() {
        return continue_pending(app, pending, key, &token);
    }

    let binding = app.keymap.lookup(app.state.mode, &token).cloned();
    match binding {
        Some(Binding::Command(command)) => app.run_command(command, &token),
        Some(Binding::Operator(op)) => {
            log::trace!("pending {op}");
            app.pending = Some(PendingOperator::new(op));
            DispatchResult::Pending
        }
        Some(Binding::Prefix(op)) => {
            log::trace!("pending {op} with {token}");
            app.pending = Some(PendingOperator {
                op,
                keys: vec![token],
            });
            DispatchResult::Pending
        }
        None => type_text(app, &key, &token),
    }
}

fn continue_pending(
    app: &mut EditorApp,
    mut pending: PendingOperator,
    key: Key,
    token: &str,
) -> DispatchResult {
    if key == Key::Esc {
        log::trace!("cancel pending {}{}", pending.op, pending.sequence());
        return DispatchResult::Skipped;
    }
    pending.keys.push(token.to_string());

    match app.pending_registry.resolve(&pending) {
        Resolution::Command(command) => {
            let sequence = format!("{}{}", pending.op, pending.sequence());
            app.run_command(command, &sequence)
        }
        Resolution::Wait => {
            log::trace!("pending {}{}", pending.op, pending.sequence());
            app.pending = Some(pending);
            DispatchResult::Pending
        }
        Resolution::NoMatch => unresolved(app, pending),
    }
}

/// `v` + anything but a text object is plain Visual mode entry followed by
/// the buffered keys. Other unresolved sequences are dropped.
fn unresolved(app: &mut EditorApp, pending: PendingOperator) -> DispatchResult {
    if pending.op == 'v' && !app.state.mode.is_visual() {
        let enter = EnterVisual {
            linewise: false,
            mode: Mode::Normal,
        };
        let mut result = app.run_command(Box::new(enter), "v");
        for key in &pending.keys {
            result = dispatch(app, key);
        }
        return result;
    }
    log::trace!("no binding for {}{}", pending.op, pending.sequence());
    DispatchResult::Skipped
}

/// Unbound printable keys type into the buffer in Insert and Replace mode
fn type_text(app: &mut EditorApp, key: &Key, token: &str) -> DispatchResult {
    let Some(text) = key.grapheme() else {
        return DispatchResult::NotHandled;
    };
    match app.state.mode {
        Mode::Insert => app.run_command(Box::new(InsertText::new(text)), token),
        Mode::Replace => app.run_command(Box::new(ReplaceInput::new(text)), token),
        _ => DispatchResult::NotHandled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::Position;

    // Helper to setup app with registered commands for tests
    fn setup_test_app(content: &str) -> EditorApp {
        let mut app = EditorApp::new();
        app.set_content(content);
        app
    }

    fn keys(app: &mut EditorApp, tokens: &[&str]) -> Vec<DispatchResult> {
        tokens.iter().map(|t| dispatch(app, t)).collect()
    }

    #[test]
    fn test_dispatch_motion() {
        let mut app = setup_test_app("hello");
        assert_eq!(dispatch(&mut app, "l"), DispatchResult::Executed);
        assert_eq!(app.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_dispatch_operator_sequence() {
        let mut app = setup_test_app("one two");
        let results = keys(&mut app, &["d", "w"]);
        assert_eq!(results, vec![DispatchResult::Pending, DispatchResult::Executed]);
        assert_eq!(app.content(), "two");
        assert_eq!(app.pending_keys(), None);
    }

    #[test]
    fn test_dispatch_unknown() {
        let mut app = setup_test_app("abc");
        assert_eq!(dispatch(&mut app, "<hyper>"), DispatchResult::NotHandled);
        assert_eq!(dispatch(&mut app, "Q"), DispatchResult::NotHandled);
    }

    #[test]
    fn test_escape_cancels_pending() {
        let mut app = setup_test_app("abc");
        assert_eq!(dispatch(&mut app, "d"), DispatchResult::Pending);
        assert_eq!(app.pending_keys().as_deref(), Some("d"));
        assert_eq!(dispatch(&mut app, "<esc>"), DispatchResult::Skipped);
        assert_eq!(app.pending_keys(), None);
        assert_eq!(app.content(), "abc");
    }

    #[test]
    fn test_unresolved_sequence_is_dropped() {
        let mut app = setup_test_app("abc");
        assert_eq!(keys(&mut app, &["d", "z"])[1], DispatchResult::Skipped);
        assert_eq!(app.pending_keys(), None);
        assert_eq!(app.content(), "abc");
    }

    #[test]
    fn test_v_falls_back_to_visual() {
        let mut app = setup_test_app("hello world");
        assert_eq!(dispatch(&mut app, "v"), DispatchResult::Pending);
        assert_eq!(app.mode(), Mode::Normal);
        assert_eq!(dispatch(&mut app, "e"), DispatchResult::Executed);
        assert_eq!(app.mode(), Mode::Visual);
        assert_eq!(app.cursor(), Position::new(0, 4));
        assert_eq!(dispatch(&mut app, "d"), DispatchResult::Executed);
        assert_eq!(app.content(), " world");
    }

    #[test]
    fn test_redo_passes_through_when_empty() {
        let mut app = setup_test_app("abc");
        assert_eq!(dispatch(&mut app, "<ctrl+r>"), DispatchResult::PassThrough);
        assert_eq!(dispatch(&mut app, "u"), DispatchResult::Skipped);
    }

    #[test]
    fn test_typing_in_insert_and_replace() {
        let mut app = setup_test_app("ac");
        keys(&mut app, &["a", "b", "😀", "<escape>"]);
        assert_eq!(app.content(), "ab😀c");
        assert_eq!(app.cursor(), Position::new(0, 2));

        keys(&mut app, &["0", "R", "x", "y"]);
        assert_eq!(app.content(), "xy😀c");
        assert_eq!(app.mode(), Mode::Replace);
        assert_eq!(dispatch(&mut app, "<ctrl+q>"), DispatchResult::NotHandled);
    }
}
