//! Command implementations for the editing engine
//!
//! This module contains all editor commands organized into logical sub-modules:
//!
//! - **movement**: Cursor navigation (`h`, `w`, `$`, `gg`, ...)
//! - **mode**: Mode entry and exit (`i`, `a`, `v`, `R`, `<escape>`, `o`)
//! - **editing**: Single-grapheme and line edits (`x`, `r`, `J`, Insert keys)
//! - **operator**: `d`/`c`/`y` composed with a motion, text object or line span
//! - **visual**: Operators on the visual selection and text-object selection
//! - **paste**: `p` / `P`
//! - **undo**: `u` / `<ctrl+r>` walk the undo history
//!
//! All commands implement the [`Command`](crate::core::command::Command) trait.
//! [`register_all`] builds the built-in binding table.

/// Basic editing (insert, delete, replace, join)
pub mod editing;
/// Mode entry and exit
pub mod mode;
/// Cursor movement commands
pub mod movement;
/// Operator + motion / text object
pub mod operator;
/// Register paste
pub mod paste;
/// Undo and redo
pub mod undo;
/// Visual-mode operators
pub mod visual;

use crate::core::keymap::{Binding, Keymap};
use crate::core::mode::Mode;
use crate::core::motion::Motion;
use crate::core::pending::PendingRegistry;
use crate::core::text_object::TextObject;

use self::editing::*;
use self::mode::*;
use self::movement::*;
use self::operator::*;
use self::paste::*;
use self::undo::*;
use self::visual::*;

/// Motions shared by Normal and the visual modes
const MOTIONS: &[(&[&str], Motion)] = &[
    (&["h", "<left>"], Motion::Left),
    (&["l", "<right>"], Motion::Right),
    (&["k", "<up>"], Motion::Up),
    (&["j", "<down>"], Motion::Down),
    (&["w"], Motion::WordForward),
    (&["W"], Motion::BigWordForward),
    (&["b"], Motion::WordBackward),
    (&["B"], Motion::BigWordBackward),
    (&["e"], Motion::WordEnd),
    (&["E"], Motion::BigWordEnd),
    (&["0", "<home>"], Motion::LineStart),
    (&["^"], Motion::FirstNonBlank),
    (&["$", "<end>"], Motion::LineEnd),
    (&["G"], Motion::BufferBottom),
];

/// Cursor keys available while typing
const INSERT_MOTIONS: &[(&[&str], Motion)] = &[
    (&["<left>"], Motion::Left),
    (&["<right>"], Motion::Right),
    (&["<up>"], Motion::Up),
    (&["<down>"], Motion::Down),
    (&["<home>"], Motion::LineStart),
    (&["<end>"], Motion::LineEnd),
];

/// Continuations after `g`
const G_MOTIONS: &[(&[&str], Motion)] = &[
    (&["g"], Motion::BufferTop),
    (&["j"], Motion::DisplayDown),
    (&["k"], Motion::DisplayUp),
];

/// Characterwise motions after `d`, `c` or `y`
const OPERATOR_MOTIONS: &[(&[&str], Motion)] = &[
    (&["w"], Motion::WordForward),
    (&["W"], Motion::BigWordForward),
    (&["e"], Motion::WordEnd),
    (&["E"], Motion::BigWordEnd),
    (&["b"], Motion::WordBackward),
    (&["B"], Motion::BigWordBackward),
    (&["$"], Motion::LineEnd),
    (&["0"], Motion::LineStart),
    (&["^"], Motion::FirstNonBlank),
    (&["h"], Motion::Left),
    (&["l"], Motion::Right),
];

/// Linewise spans after `d`, `c` or `y` (the doubled key is added per operator)
const OPERATOR_SPANS: &[(&[&str], LineSpan)] = &[
    (&["j"], LineSpan::Down),
    (&["k"], LineSpan::Up),
    (&["gg"], LineSpan::ToTop),
    (&["G"], LineSpan::ToBottom),
];

/// Text objects as `(inner keys, around keys, object)`
const TEXT_OBJECTS: &[(&[&str], &[&str], TextObject)] = &[
    (&["iw"], &["aw"], TextObject::Word),
    (&["iW"], &["aW"], TextObject::BigWord),
    (&["i\""], &["a\""], TextObject::Quote('"')),
    (&["i'"], &["a'"], TextObject::Quote('\'')),
    (&["ib"], &["ab"], TextObject::Bracket(None)),
    (&["i(", "i)"], &["a(", "a)"], TextObject::Bracket(Some(('(', ')')))),
    (&["i[", "i]"], &["a[", "a]"], TextObject::Bracket(Some(('[', ']')))),
    (&["i{", "i}"], &["a{", "a}"], TextObject::Bracket(Some(('{', '}')))),
];

const VISUAL_MODES: [Mode; 2] = [Mode::Visual, Mode::VisualLine];

/// Register all built-in bindings: direct `(mode, key)` entries in `keymap`
/// and `(operator, sequence)` entries in `pending`.
pub fn register_all(keymap: &mut Keymap, pending: &mut PendingRegistry) {
    register_normal(keymap);
    register_visual(keymap);
    register_insert(keymap);
    register_replace(keymap);
    register_pending(pending);
}

fn register_normal(keymap: &mut Keymap) {
    let normal = Mode::Normal;

    // Movement commands
    for (keys, motion) in MOTIONS {
        keymap.bind_command(Box::new(MoveCommand::new(*motion, normal, *keys)));
    }
    keymap.bind_command(Box::new(MoveCommand::new(Motion::Right, normal, &[" "])));
    keymap.bind_command(Box::new(MoveCommand::new(Motion::Left, normal, &["<backspace>"])));

    // Operators wait for the rest of the sequence
    for op in ['d', 'c', 'y', 'v', 'g', 'r'] {
        keymap.bind(normal, &op.to_string(), Binding::Operator(op));
    }

    // Mode entry
    for entry in [
        InsertEntry::Before,
        InsertEntry::After,
        InsertEntry::LineStart,
        InsertEntry::LineEnd,
    ] {
        keymap.bind_command(Box::new(EnterInsert { entry }));
    }
    keymap.bind_command(Box::new(OpenLine::new(false)));
    keymap.bind_command(Box::new(OpenLine::new(true)));
    keymap.bind_command(Box::new(EnterVisual {
        linewise: true,
        mode: normal,
    }));
    keymap.bind_command(Box::new(EnterReplace));

    // Editing commands
    keymap.bind_command(Box::new(DeleteChar::default()));
    keymap.bind_command(Box::new(JoinLines::default()));
    keymap.bind_command(Box::new(Paste::new(false)));
    keymap.bind_command(Box::new(Paste::new(true)));
    keymap.bind_command(Box::new(OperatorCommand::new(
        Operator::Delete,
        Target::Motion(Motion::LineEnd),
        &["D"],
    )));
    keymap.bind_command(Box::new(OperatorCommand::new(
        Operator::Change,
        Target::Motion(Motion::LineEnd),
        &["C"],
    )));
    keymap.bind_command(Box::new(LinewiseCommand::new(
        Operator::Yank,
        LineSpan::Current,
        &["Y"],
    )));

    keymap.bind_command(Box::new(Undo));
    keymap.bind_command(Box::new(Redo));

    keymap.bind_command(Box::new(ExitMode { mode: normal }));
}

fn register_visual(keymap: &mut Keymap) {
    for mode in VISUAL_MODES {
        for (keys, motion) in MOTIONS {
            keymap.bind_command(Box::new(MoveCommand::new(*motion, mode, *keys)));
        }
        keymap.bind(mode, "g", Binding::Operator('g'));
        keymap.bind(mode, "i", Binding::Prefix('v'));
        keymap.bind(mode, "a", Binding::Prefix('v'));

        keymap.bind_command(Box::new(VisualOperatorCommand::new(
            Operator::Delete,
            mode,
            &["d", "x"],
        )));
        keymap.bind_command(Box::new(VisualOperatorCommand::new(
            Operator::Change,
            mode,
            &["c", "s"],
        )));
        keymap.bind_command(Box::new(VisualOperatorCommand::new(
            Operator::Yank,
            mode,
            &["y"],
        )));

        keymap.bind_command(Box::new(EnterVisual {
            linewise: false,
            mode,
        }));
        keymap.bind_command(Box::new(EnterVisual {
            linewise: true,
            mode,
        }));
        keymap.bind_command(Box::new(ExitMode { mode }));
    }
}

fn register_insert(keymap: &mut Keymap) {
    let insert = Mode::Insert;
    for (keys, motion) in INSERT_MOTIONS {
        keymap.bind_command(Box::new(MoveCommand::new(*motion, insert, *keys)));
    }
    keymap.bind(insert, "<enter>", Binding::Command(Box::new(InsertText::new("\n"))));
    keymap.bind(insert, "<tab>", Binding::Command(Box::new(InsertText::new("\t"))));
    keymap.bind_command(Box::new(Backspace::default()));
    keymap.bind_command(Box::new(DeleteKey::default()));
    keymap.bind_command(Box::new(KillLine::new(false)));
    keymap.bind_command(Box::new(KillLine::new(true)));
    keymap.bind_command(Box::new(ExitMode { mode: insert }));
}

fn register_replace(keymap: &mut Keymap) {
    let replace = Mode::Replace;
    for (keys, motion) in INSERT_MOTIONS {
        keymap.bind_command(Box::new(MoveCommand::new(*motion, replace, *keys)));
    }
    keymap.bind_command(Box::new(MoveCommand::new(Motion::Left, replace, &["<backspace>"])));
    keymap.bind_command(Box::new(ExitMode { mode: replace }));
}

fn register_pending(pending: &mut PendingRegistry) {
    for (keys, motion) in G_MOTIONS {
        pending.register('g', Box::new(MoveCommand::new(*motion, Mode::Normal, *keys)));
    }

    for op_key in ['d', 'c', 'y'] {
        let Some(op) = Operator::from_key(op_key) else {
            continue;
        };
        let doubled: &'static [&'static str] = match op {
            Operator::Delete => &["d"],
            Operator::Change => &["c"],
            Operator::Yank => &["y"],
        };
        pending.register(op_key, Box::new(LinewiseCommand::new(op, LineSpan::Current, doubled)));
        for (keys, span) in OPERATOR_SPANS {
            pending.register(op_key, Box::new(LinewiseCommand::new(op, *span, *keys)));
        }
        for (keys, motion) in OPERATOR_MOTIONS {
            let command = OperatorCommand::new(op, Target::Motion(*motion), *keys);
            pending.register(op_key, Box::new(command));
        }
        for (inner_keys, around_keys, object) in TEXT_OBJECTS {
            for (keys, inner) in [(*inner_keys, true), (*around_keys, false)] {
                let target = Target::Object {
                    object: *object,
                    inner,
                };
                pending.register(op_key, Box::new(OperatorCommand::new(op, target, keys)));
            }
        }
    }

    for (inner_keys, around_keys, object) in TEXT_OBJECTS {
        for (keys, inner) in [(*inner_keys, true), (*around_keys, false)] {
            let command = SelectTextObject::new(*object, inner, Mode::Visual, keys);
            pending.register('v', Box::new(command));
        }
    }
}
