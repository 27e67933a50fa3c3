//! Foundation Stress Tests
//!
//! Verify the core data structures hold up before trusting features built on
//! top: buffer integrity, undo/redo exactness, and grapheme handling.

use vimcore::core::app::EditorApp;
use vimcore::core::buffer::{Buffer, BytePos, Position};
use vimcore::core::dispatcher::DispatchResult;
use vimcore::core::error::EditError;

/// Simple hash function for content comparison (no crypto needed)
fn hash_content(s: &str) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}

fn app_with(content: &str) -> EditorApp {
    let mut app = EditorApp::new();
    app.set_content(content);
    app
}

/// Feed characters as key tokens, spelling the named keys
fn type_chars(app: &mut EditorApp, text: &str) {
    for c in text.chars() {
        let token = match c {
            '\n' => "<enter>".to_string(),
            '\t' => "<tab>".to_string(),
            c => c.to_string(),
        };
        app.handle_key(&token);
    }
}

fn undo_all(app: &mut EditorApp) -> usize {
    let mut count = 0;
    while app.undo().unwrap_or(true) {
        count += 1;
        if count > 100_000 {
            panic!("Undo never reached the base state");
        }
    }
    count
}

// =============================================================================
// HISTORY INTEGRITY TESTS
// =============================================================================

#[test]
fn history_2k_inserts_undo_all() {
    let initial_content = "Hello, World!\nThis is a test file.\nWith multiple lines.";
    let mut app = app_with(initial_content);
    let original_hash = hash_content(&app.content());

    app.handle_key("A");
    for _ in 0..2_000 {
        app.handle_key("x");
    }
    app.handle_key("<escape>");

    assert!(
        app.content() != initial_content,
        "Buffer should be modified after edits"
    );

    // Every typed grapheme is its own entry
    assert_eq!(undo_all(&mut app), 2_000);

    let final_hash = hash_content(&app.content());
    assert_eq!(
        original_hash,
        final_hash,
        "Data corruption detected! Original and final content differ after undo.\nOriginal: {:?}\nFinal: {:?}",
        initial_content,
        app.content()
    );
}

#[test]
fn history_deep_undo_redo_cycle() {
    let mut app = app_with("Start");

    for i in 0..300 {
        app.handle_key("o");
        type_chars(&mut app, &format!("Line {}", i));
        app.handle_key("<escape>");
    }
    let full = app.content();
    assert_eq!(app.lines().len(), 301);

    for _ in 0..500 {
        assert_eq!(app.undo(), Ok(true), "Undo should succeed");
    }
    for _ in 0..500 {
        assert!(app.redo(), "Redo should succeed");
    }
    assert_eq!(app.content(), full);

    undo_all(&mut app);
    assert_eq!(app.content(), "Start");
}

#[test]
fn buffer_rapid_insert_delete_cycle() {
    let mut buffer = Buffer::new();

    for round in 0..100 {
        for _ in 0..100 {
            buffer.insert(BytePos::new(0, 0), "x").unwrap();
        }
        for _ in 0..100 {
            buffer.remove(BytePos::new(0, 0), BytePos::new(0, 1)).unwrap();
        }

        assert!(
            buffer.to_string().is_empty(),
            "Buffer should be empty after round {}, got: {:?}",
            round,
            buffer.to_string()
        );
    }
}

// =============================================================================
// UTF-8 BOUNDARY TESTS
// =============================================================================

#[test]
fn utf8_multibyte_delete() {
    let mut buffer = Buffer::from_string("Hello 世界 🦀");

    let world_start = "Hello ".len();
    let removed = buffer
        .remove(
            BytePos::new(0, world_start),
            BytePos::new(0, world_start + "世".len()),
        )
        .unwrap();

    assert_eq!(removed, "世");
    assert_eq!(buffer.to_string(), "Hello 界 🦀");
}

#[test]
fn utf8_mid_char_edits_are_rejected() {
    let mut buffer = Buffer::from_string("日本語");

    let result = buffer.insert(BytePos::new(0, 1), "X");
    assert_eq!(result, Err(EditError::NotCharBoundary { row: 0, byte: 1 }));
    assert!(buffer.remove(BytePos::new(0, 0), BytePos::new(0, 2)).is_err());
    assert_eq!(buffer.to_string(), "日本語");

    buffer.insert(BytePos::new(0, "日".len()), "X").unwrap();
    assert_eq!(buffer.to_string(), "日X本語");
}

#[test]
fn utf8_emoji_handling() {
    let mut app = app_with("🦀🦀🦀");
    app.set_cursor(Position::new(0, 1));
    assert_eq!(app.handle_key("x"), DispatchResult::Executed);
    assert_eq!(app.content(), "🦀🦀");
    assert_eq!(app.register().text(), "🦀");
}

#[test]
fn utf8_zwj_sequence_deletes_atomically() {
    let family = "👨\u{200D}👩\u{200D}👧";
    let mut app = app_with(&format!("a{family}b"));
    app.set_cursor(Position::new(0, 1));
    app.handle_key("x");
    assert_eq!(app.content(), "ab");
    assert_eq!(app.register().text(), family);

    app.undo().unwrap();
    assert_eq!(app.content(), format!("a{family}b"));
    assert_eq!(app.cursor(), Position::new(0, 1));
}

#[test]
fn utf8_mixed_content_stress() {
    let mixed = "ASCII日本語🦀More ASCII한글";
    let mut app = app_with(mixed);

    app.handle_key("I");
    type_chars(&mut app, "→");
    app.handle_key("<escape>");
    app.handle_key("A");
    type_chars(&mut app, "←");
    app.handle_key("<escape>");
    assert_eq!(app.content(), format!("→{mixed}←"));

    app.undo().unwrap();
    app.undo().unwrap();
    assert_eq!(app.content(), mixed);
}

#[test]
fn combining_marks_move_as_one() {
    let mut app = app_with("e\u{301}x");
    app.handle_key("l");
    assert_eq!(app.cursor(), Position::new(0, 1));
    app.handle_key("h");
    app.handle_key("x");
    assert_eq!(app.content(), "x");
}

// =============================================================================
// LINE OPERATIONS
// =============================================================================

#[test]
fn line_indexing_stress() {
    let lines: Vec<String> = (0..1000).map(|i| format!("Line {}", i)).collect();
    let buffer = Buffer::from_lines(&lines[..]);

    assert_eq!(buffer.line_count(), 1000);
    for (i, expected) in lines.iter().enumerate() {
        assert_eq!(&buffer.line(i), expected, "Line {} corrupted", i);
    }
    assert_eq!(buffer.line(1000), "");
}

#[test]
fn multi_line_join_split_round_trip() {
    let mut app = app_with("alpha\n   beta\ngamma");
    let original = app.content();

    app.handle_key("J");
    assert_eq!(app.lines(), vec!["alpha beta", "gamma"]);
    app.handle_key("J");
    assert_eq!(app.lines(), vec!["alpha beta gamma"]);

    app.handle_key("0");
    app.handle_key("w");
    app.handle_key("i");
    app.handle_key("<enter>");
    app.handle_key("<escape>");
    assert_eq!(app.lines(), vec!["alpha ", "beta gamma"]);

    undo_all(&mut app);
    assert_eq!(app.content(), original);
}

// =============================================================================
// MEMORY AND BOUNDS
// =============================================================================

#[test]
fn empty_buffer_operations() {
    let mut app = app_with("");

    assert_eq!(app.lines(), vec![String::new()]);
    assert_eq!(app.handle_key("x"), DispatchResult::Skipped);
    assert_eq!(app.handle_key("D"), DispatchResult::Skipped);
    for key in ["j", "k", "w", "b", "e", "$", "G"] {
        app.handle_key(key);
        assert_eq!(app.cursor(), Position::new(0, 0), "after {key}");
    }

    app.handle_key("i");
    assert_eq!(app.handle_key("<backspace>"), DispatchResult::Skipped);
    assert_eq!(app.handle_key("<delete>"), DispatchResult::Skipped);
    app.handle_key("<escape>");

    // Deleting the only line clears it rather than removing it
    app.handle_key("d");
    app.handle_key("d");
    assert_eq!(app.lines(), vec![String::new()]);

    assert_eq!(app.undo(), Ok(true));
    assert_eq!(app.undo(), Ok(false));
    assert!(app.redo());
    assert_eq!(app.content(), "");
}

#[test]
fn out_of_range_positions_are_clamped() {
    let mut app = app_with("abc\nde");
    app.set_cursor(Position::new(usize::MAX, usize::MAX));
    assert_eq!(app.cursor(), Position::new(1, 1));

    let buffer = Buffer::from_string("abc");
    assert_eq!(
        buffer.byte_pos(Position::new(0, 99)),
        Ok(BytePos::new(0, 3))
    );
    assert!(buffer.byte_pos(Position::new(5, 0)).is_err());
}

// =============================================================================
// LARGE BUFFERS
// =============================================================================

#[test]
fn test_rapid_typing_simulation() {
    let mut app = app_with("");
    let typing_content =
        "The quick brown fox jumps over the lazy dog! 1234567890\n\t!@#$%^&*()_+ \n";

    app.handle_key("i");
    let mut expected = String::new();
    for i in 0..5_000 {
        let c = typing_content.chars().nth(i % typing_content.chars().count()).unwrap();
        expected.push(c);
        type_chars(&mut app, &c.to_string());
    }
    app.handle_key("<escape>");
    assert_eq!(app.content(), expected);

    undo_all(&mut app);
    assert_eq!(
        app.content(),
        "",
        "Buffer should be empty after undoing all rapid typing"
    );
}

#[test]
fn test_large_buffer_operations() {
    let content: Vec<String> = (0..100_000).map(|i| format!("Line {}", i)).collect();
    let mut app = app_with(&content.join("\n"));
    assert_eq!(app.lines().len(), 100_000);

    app.handle_key("G");
    assert_eq!(app.cursor().row, 99_999);

    app.set_cursor(Position::new(50_000, 0));
    app.handle_key("d");
    app.handle_key("d");
    assert_eq!(app.state.buffer.line_count(), 99_999);
    assert_eq!(app.state.buffer.line(50_000), "Line 50001");
    assert_eq!(app.register().text(), "Line 50000");

    app.handle_key("P");
    assert_eq!(app.state.buffer.line(50_000), "Line 50000");
    assert_eq!(app.state.buffer.line_count(), 100_000);

    undo_all(&mut app);
    assert_eq!(app.content(), content.join("\n"));
}
