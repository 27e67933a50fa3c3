//! Static key bindings: `(Mode, key token)` to what the key does.

use std::collections::HashMap;

use crate::core::command::Command;
use crate::core::mode::Mode;

/// What a bound key does when no operator is pending
#[derive(Debug, Clone)]
pub enum Binding {
    /// Clone the prototype and execute it
    Command(Box<dyn Command>),
    /// Start a pending operator (`d`, `c`, `y`, `v`, `g`, `r`)
    Operator(char),
    /// Start a pending operator with this key already buffered (Visual `i`/`a`)
    Prefix(char),
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<(Mode, String), Binding>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, mode: Mode, key: &str, binding: Binding) {
        self.bindings.insert((mode, key.to_string()), binding);
    }

    /// Bind a prototype under every key it declares, in its own mode
    pub fn bind_command(&mut self, command: Box<dyn Command>) {
        let mode = command.mode();
        let keys: Vec<&'static str> = command.keys().to_vec();
        for key in keys {
            self.bind(mode, key, Binding::Command(command.clone()));
        }
    }

    pub fn lookup(&self, mode: Mode, key: &str) -> Option<&Binding> {
        self.bindings.get(&(mode, key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
