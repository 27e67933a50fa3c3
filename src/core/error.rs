//! Error types for buffer mutation and undo

use thiserror::Error;

/// Failure while applying or reverting an edit.
///
/// These only surface from `Command::undo` and from the buffer primitives;
/// unmet preconditions during execution are reported as `ExecuteResult::Skipped`
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{0} has not been executed")]
    NotExecuted(&'static str),

    #[error("row {row} out of range (buffer has {line_count} lines)")]
    RowOutOfRange { row: usize, line_count: usize },

    #[error("byte offset {byte} in row {row} is not a character boundary")]
    NotCharBoundary { row: usize, byte: usize },

    #[error("buffer text at row {row} no longer matches the recorded edit")]
    ContentMismatch { row: usize },

    #[error("unknown key token: {0}")]
    UnknownKey(String),
}
