//! Room resolution and state-transition engine for Taleweaver.
//!
//! Given an immutable [`tw_core::StoryGraph`], a [`GameSession`] tracks the
//! current room and the player's loot. Each turn resolves the room version
//! that applies to the player, applies its trigger and automatic loot, and
//! waits for either a choice or a dice roll before moving on.
//!
//! The session exposes a pull-based [`GameSession::view`] for renderers and
//! push-based commands ([`GameSession::choose`], [`GameSession::request_roll`],
//! [`GameSession::commit_roll`]) for player actions.

/// Condition evaluation against player state.
pub mod condition;
/// Engine configuration.
pub mod config;
/// Non-fatal content diagnostics.
pub mod diagnostics;
/// Error types for the engine.
pub mod error;
/// Record of committed transitions.
pub mod journal;
/// Automatic and manual loot transfer.
pub mod loot;
/// Player state.
pub mod player;
/// Dice range parsing and outcome lookup.
pub mod range;
/// Room version selection.
pub mod resolver;
/// Game session management.
pub mod session;
/// Per-turn transition logic and the turn state machine.
pub mod transition;
/// Story content validation.
pub mod validate;
/// Renderer-facing snapshot of a turn.
pub mod view;

pub use config::EngineConfig;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{ActionRejected, EngineError, EngineResult};
pub use journal::{Journal, JournalEntry};
pub use player::PlayerState;
pub use range::{RangeError, RollRange, parse_range};
pub use session::{GameSession, PendingRoll, SessionId};
pub use transition::{ChoiceResolution, DiceResolution, Phase, TransitionEngine, Turn};
pub use validate::{ValidationIssue, validate_story};
pub use view::{OutcomePreview, Prompt, TurnView};
