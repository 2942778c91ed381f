//! Error types for the engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running a story.
///
/// Content errors are fatal to the turn they occur in: the session stops in
/// [`crate::Phase::Failed`] and renderers show the message instead of
/// content. Rejected actions leave the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A `goto` or start id names a room the story does not contain.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// No version of the room matched and it has no default version.
    #[error("room {0} has no matching version and no default version")]
    MissingDefaultVersion(String),

    /// A dice branch with no outcomes to resolve.
    #[error("room {0} has an empty dice table")]
    EmptyDiceTable(String),

    /// A player action was not accepted in the current phase.
    #[error("action rejected: {0}")]
    Rejected(#[from] ActionRejected),
}

impl EngineError {
    /// Whether this is a rejected player action rather than a content error.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Why a player action was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    /// A choice was submitted while the turn does not offer choices.
    #[error("not waiting for a choice")]
    NotAwaitingChoice,

    /// A roll was requested while the turn does not offer a dice table.
    #[error("not waiting for a roll")]
    NotAwaitingRoll,

    /// A roll was requested while another one is still pending.
    #[error("a roll is already in progress")]
    RollInProgress,

    /// The roll handle is not the session's pending roll.
    #[error("roll handle is stale or belongs to another session")]
    StaleRoll,

    /// The choice index is outside the offered list.
    #[error("invalid choice {index} (of {available})")]
    InvalidChoice {
        /// The submitted zero-based index.
        index: usize,
        /// Number of choices offered.
        available: usize,
    },
}
