//! This module constitutes the core, headless, and backend-agnostic editing engine.
//! It manages the buffer and cursor state, the command set with its motion and
//! text-object algorithms, key dispatch with pending operators, and the undo
//! history.

pub mod app;
pub mod buffer;
pub mod command;
pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod history;
pub mod input;
pub mod keymap;
pub mod mode;
pub mod motion;
pub mod pending;
pub mod register;
pub mod selection;
pub mod state;
pub mod text_object;
pub mod undo_group;
pub mod utf8;
