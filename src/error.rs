//! Error types for the search engine contract

use derive_more::{Display, Error};

use crate::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Misuse of the engine's call contract.
///
/// The engine is pure computation, so every error here is a caller error:
/// there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// Invalid coordinates, an occupied target cell, or a board that cannot be
    /// searched (full, already won, or no side to move).
    #[display("precondition violated: {reason}")]
    PreconditionViolation { reason: String },
    /// `next_move` or `finish` called without an active search session.
    #[display("call sequence violated: {reason}")]
    SequenceViolation { reason: String },
    /// Board dimension outside what the engine supports.
    #[display(
        "unsupported board size {size} (supported: {}..={})",
        MIN_BOARD_SIZE,
        MAX_BOARD_SIZE
    )]
    UnsupportedBoardSize { size: usize },
}

impl EngineError {
    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        Self::PreconditionViolation {
            reason: reason.into(),
        }
    }

    pub(crate) fn sequence(reason: impl Into<String>) -> Self {
        Self::SequenceViolation {
            reason: reason.into(),
        }
    }
}
