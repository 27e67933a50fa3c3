//! This module defines the central `EditorApp` structure: one editing
//! session with its buffer state, undo history, bindings and pending
//! operator. Hosts feed it key tokens and read the state back.

use crate::config::Config;
use crate::core::buffer::Position;
use crate::core::command::{Command, ExecuteResult, YankHighlight};
use crate::core::commands::register_all;
use crate::core::dispatcher::{self, DispatchResult};
use crate::core::error::EditError;
use crate::core::history::CommandHistory;
use crate::core::keymap::Keymap;
use crate::core::mode::Mode;
use crate::core::pending::{PendingOperator, PendingRegistry};
use crate::core::register::YankRegister;
use crate::core::state::EditorState;

/// EditorApp: the root of an editing session. Owns everything a key can
/// touch; nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct EditorApp {
    /// Buffer, cursor, mode, selection anchor and register
    pub state: EditorState,
    /// Executed undoable commands
    pub history: CommandHistory,
    /// Direct `(mode, key)` bindings
    pub keymap: Keymap,
    /// `(operator, sequence)` bindings
    pub pending_registry: PendingRegistry,
    /// Operator waiting for the rest of its sequence
    pub pending: Option<PendingOperator>,
    /// Region the last command asks the renderer to flash
    pub highlight: Option<YankHighlight>,
    /// `yank_highlight` setting
    pub show_highlights: bool,
    /// Dispatch depth counter for re-dispatch of buffered keys
    pub dispatch_depth: usize,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorApp {
    /// Creates a new `EditorApp` with an empty buffer, the default settings
    /// and the built-in bindings.
    pub fn new() -> Self {
        let mut config = Config::default();
        crate::user_config::configure(&mut config);
        Self::with_config(&config)
    }

    /// Initialize an EditorApp from config settings
    pub fn with_config(config: &Config) -> Self {
        let mut keymap = Keymap::new();
        let mut pending_registry = PendingRegistry::new();
        register_all(&mut keymap, &mut pending_registry);

        let mut state = EditorState::new();
        state.tab_width = config.tab_width();
        state.width = config.wrap_width();

        Self {
            state,
            history: CommandHistory::new(config.history_limit()),
            keymap,
            pending_registry,
            pending: None,
            highlight: None,
            show_highlights: config.yank_highlight(),
            dispatch_depth: 0,
        }
    }

    /// Dispatch one key token (`"d"`, `"<escape>"`, `"<ctrl+r>"`, ...)
    pub fn handle_key(&mut self, token: &str) -> DispatchResult {
        dispatcher::dispatch(self, token)
    }

    /// Execute a command and do the per-key bookkeeping: history push,
    /// highlight capture, cursor clamp and preferred column.
    pub fn run_command(&mut self, mut command: Box<dyn Command>, key: &str) -> DispatchResult {
        let result = command.execute_with_history(&mut self.state, &mut self.history);
        log::debug!("{key} -> {} ({result:?})", command.id());

        let show = self.show_highlights;
        self.highlight = command
            .yank_highlight()
            .map(|highlight| if show { highlight } else { YankHighlight::hidden() });

        if !self.state.mode.is_visual() {
            self.state.visual_anchor = None;
        }
        self.state.clamp_cursor();

        if result == ExecuteResult::Executed {
            if !command.manages_preferred_column() {
                self.state.preferred_col = self.state.cursor.col;
            }
            if command.is_undoable() {
                self.history.push(command);
            }
        }
        result.into()
    }

    // ==================== Host API ====================

    /// Replace the whole buffer. History, pending keys and the selection
    /// are cleared; the register survives.
    pub fn set_content(&mut self, content: &str) {
        self.state.buffer.set_content(content);
        self.state.cursor = Position::default();
        self.state.mode = Mode::Normal;
        self.state.visual_anchor = None;
        self.state.preferred_col = 0;
        self.history.clear();
        self.pending = None;
        self.highlight = None;
    }

    pub fn content(&self) -> String {
        self.state.buffer.to_string()
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.buffer.lines()
    }

    pub fn cursor(&self) -> Position {
        self.state.cursor
    }

    /// Move the cursor, clamped to the buffer for the current mode
    pub fn set_cursor(&mut self, pos: Position) {
        self.state.cursor = self.state.clamp(pos, self.state.mode);
        self.state.preferred_col = self.state.cursor.col;
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Switch mode directly. Drops any pending operator; entering a visual
    /// mode anchors the selection at the cursor.
    pub fn set_mode(&mut self, mode: Mode) {
        self.pending = None;
        if mode.is_visual() {
            if self.state.visual_anchor.is_none() || !self.state.mode.is_visual() {
                self.state.visual_anchor = Some(self.state.cursor);
            }
        } else {
            self.state.visual_anchor = None;
        }
        self.state.mode = mode;
        self.state.clamp_cursor();
    }

    pub fn register(&self) -> &YankRegister {
        &self.state.register
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the last applied command. `Ok(false)` when there is nothing to
    /// undo; an error still leaves the entry counted as undone.
    pub fn undo(&mut self) -> Result<bool, EditError> {
        self.pending = None;
        let result = self.history.undo(&mut self.state);
        self.settle();
        result
    }

    /// Redo the next undone command. `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.pending = None;
        let redone = self.history.redo(&mut self.state);
        self.settle();
        redone
    }

    pub fn yank_highlight(&self) -> Option<YankHighlight> {
        self.highlight
    }

    /// Operator and keys typed so far, e.g. `"di"`
    pub fn pending_keys(&self) -> Option<String> {
        self.pending
            .as_ref()
            .map(|p| format!("{}{}", p.op, p.sequence()))
    }

    /// Soft-wrap width hint for `gj`/`gk`; 0 disables wrapping
    pub fn set_width(&mut self, width: usize) {
        self.state.width = width;
    }

    /// Normalize state after history movement
    fn settle(&mut self) {
        if !self.state.mode.is_visual() {
            self.state.visual_anchor = None;
        }
        self.state.clamp_cursor();
        self.state.preferred_col = self.state.cursor.col;
    }
}
