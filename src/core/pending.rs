//! Pending-operator state machine
//!
//! An operator key (`d`, `c`, `y`, `v`, `g`, `r`) parks the dispatcher in a
//! pending state. Following keys are buffered until the `(operator,
//! sequence)` pair names a registered command, can no longer become one, or
//! the user cancels with escape.

use std::collections::{HashMap, HashSet};

use unicode_segmentation::UnicodeSegmentation;

use crate::core::command::Command;
use crate::core::commands::editing::ReplaceChar;
use crate::core::input::Key;

/// An operator waiting for the rest of its key sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperator {
    pub op: char,
    pub keys: Vec<String>,
}

impl PendingOperator {
    pub fn new(op: char) -> Self {
        Self {
            op,
            keys: Vec::new(),
        }
    }

    /// Buffered keys joined into one sequence (`"iw"`, `"gg"`)
    pub fn sequence(&self) -> String {
        self.keys.concat()
    }
}

/// Outcome of feeding the buffered keys to the registry
#[derive(Debug)]
pub enum Resolution {
    Command(Box<dyn Command>),
    /// A longer sequence could still match
    Wait,
    NoMatch,
}

#[derive(Debug, Clone, Default)]
pub struct PendingRegistry {
    bindings: HashMap<(char, String), Box<dyn Command>>,
    prefixes: HashSet<(char, String)>,
}

impl PendingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `command` for `op` followed by each sequence it declares
    pub fn register(&mut self, op: char, command: Box<dyn Command>) {
        let sequences: Vec<&'static str> = command.keys().to_vec();
        for sequence in sequences {
            let mut prefix = String::new();
            let graphemes: Vec<&str> = sequence.graphemes(true).collect();
            if let Some((_, init)) = graphemes.split_last() {
                for g in init {
                    prefix.push_str(g);
                    self.prefixes.insert((op, prefix.clone()));
                }
            }
            self.bindings.insert((op, sequence.to_string()), command.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn resolve(&self, pending: &PendingOperator) -> Resolution {
        // `r` takes any single printable key as its argument
        if pending.op == 'r' {
            return match pending.keys.as_slice() {
                [key] => match key.parse::<Key>() {
                    Ok(Key::Grapheme(g)) => Resolution::Command(Box::new(ReplaceChar::new(g))),
                    _ => Resolution::NoMatch,
                },
                _ => Resolution::NoMatch,
            };
        }

        let key = (pending.op, pending.sequence());
        if let Some(command) = self.bindings.get(&key) {
            Resolution::Command(command.clone())
        } else if self.prefixes.contains(&key) {
            Resolution::Wait
        } else {
            Resolution::NoMatch
        }
    }
}
