//! Visual and Visual Line mode through the key dispatcher

use vimcore::core::app::EditorApp;
use vimcore::core::buffer::Position;
use vimcore::core::dispatcher::DispatchResult;
use vimcore::core::mode::Mode;

fn app_at(content: &str, row: usize, col: usize) -> EditorApp {
    let mut app = EditorApp::new();
    app.set_content(content);
    app.set_cursor(Position::new(row, col));
    app
}

fn press(app: &mut EditorApp, keys: &str) -> DispatchResult {
    let mut last = DispatchResult::NotHandled;
    for key in keys.split_whitespace() {
        last = app.handle_key(key);
    }
    last
}

#[test]
fn charwise_yank_returns_to_selection_start() {
    let mut app = app_at("hello world", 0, 0);
    press(&mut app, "v l l");
    assert_eq!(app.mode(), Mode::Visual);
    assert_eq!(app.state.visual_anchor, Some(Position::new(0, 0)));

    assert_eq!(press(&mut app, "y"), DispatchResult::Executed);
    assert_eq!(app.register().text(), "hel");
    assert!(!app.register().is_linewise());
    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.cursor(), Position::new(0, 0));
    assert_eq!(app.state.visual_anchor, None);

    let hl = app.yank_highlight().unwrap();
    assert_eq!((hl.start, hl.end), (Position::new(0, 0), Position::new(0, 2)));
}

#[test]
fn backward_selection_deletes_inclusive() {
    let mut app = app_at("hello world", 0, 0);
    press(&mut app, "$ v b d");
    assert_eq!(app.content(), "hello ");
    assert_eq!(app.register().text(), "world");
    assert_eq!(app.cursor(), Position::new(0, 5));
}

#[test]
fn line_delete_and_undo() {
    let mut app = app_at("one\ntwo\nthree\nfour", 1, 1);
    press(&mut app, "V j");
    assert_eq!(app.mode(), Mode::VisualLine);

    press(&mut app, "d");
    assert_eq!(app.lines(), vec!["one", "four"]);
    assert_eq!(app.register().text(), "two\nthree");
    assert!(app.register().is_linewise());
    assert_eq!(app.cursor(), Position::new(1, 0));

    press(&mut app, "u");
    assert_eq!(app.lines(), vec!["one", "two", "three", "four"]);
    assert_eq!(app.cursor(), Position::new(2, 1));
}

#[test]
fn line_change_keeps_an_empty_line() {
    let mut app = app_at("a\nb\nc", 0, 0);
    press(&mut app, "V j c");
    assert_eq!(app.lines(), vec!["", "c"]);
    assert_eq!(app.mode(), Mode::Insert);
    assert_eq!(app.cursor(), Position::new(0, 0));

    press(&mut app, "z <escape> u u");
    assert_eq!(app.lines(), vec!["a", "b", "c"]);
    assert_eq!(app.mode(), Mode::Normal);
}

#[test]
fn redo_replays_visual_delete_without_selection() {
    let mut app = app_at("abcdef", 0, 1);
    press(&mut app, "v l l d");
    assert_eq!(app.content(), "aef");

    press(&mut app, "u");
    assert_eq!(app.content(), "abcdef");
    assert_eq!(app.mode(), Mode::Normal);

    assert_eq!(press(&mut app, "<ctrl+r>"), DispatchResult::Executed);
    assert_eq!(app.content(), "aef");
    assert_eq!(app.cursor(), Position::new(0, 1));
}

#[test]
fn select_inner_word_then_change() {
    let mut app = app_at("hello world", 0, 2);
    assert_eq!(press(&mut app, "v i w"), DispatchResult::Executed);
    assert_eq!(app.mode(), Mode::Visual);
    assert_eq!(app.state.visual_anchor, Some(Position::new(0, 0)));
    assert_eq!(app.cursor(), Position::new(0, 4));
    assert!(app.yank_highlight().is_some_and(|h| h.show));

    press(&mut app, "c");
    assert_eq!(app.content(), " world");
    assert_eq!(app.mode(), Mode::Insert);
    assert_eq!(app.register().text(), "hello");
}

#[test]
fn text_object_inside_visual_mode() {
    let mut app = app_at("f(a, b)", 0, 0);
    press(&mut app, "v");
    press(&mut app, "l l l");
    assert_eq!(app.mode(), Mode::Visual);

    assert_eq!(press(&mut app, "i b"), DispatchResult::Executed);
    assert_eq!(app.state.visual_anchor, Some(Position::new(0, 2)));
    assert_eq!(app.cursor(), Position::new(0, 5));
    press(&mut app, "y");
    assert_eq!(app.register().text(), "a, b");
}

#[test]
fn missing_text_object_stays_in_normal() {
    let mut app = app_at("plain", 0, 1);
    assert_eq!(press(&mut app, "v i b"), DispatchResult::Skipped);
    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.state.visual_anchor, None);
    assert!(app.yank_highlight().is_some_and(|h| !h.show));
}

#[test]
fn escape_and_mode_switches() {
    let mut app = app_at("abc\ndef", 0, 1);
    press(&mut app, "V");
    assert_eq!(app.mode(), Mode::VisualLine);
    press(&mut app, "v");
    assert_eq!(app.mode(), Mode::Visual);
    assert_eq!(app.state.visual_anchor, Some(Position::new(0, 1)));

    press(&mut app, "<escape>");
    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.state.visual_anchor, None);
    assert_eq!(app.content(), "abc\ndef");
    assert!(!app.can_undo());
}
