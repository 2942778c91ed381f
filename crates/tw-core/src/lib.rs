//! Core types for Taleweaver: the immutable story graph.
//!
//! A story is an ordered list of rooms. Each room carries one or more
//! versions, selected at play time by the player's accumulated loot. This
//! crate only describes and loads stories; resolving them against player
//! state lives in `tw-engine`.

/// Conditions gating room versions.
pub mod condition;
/// Error types used throughout the crate.
pub mod error;
/// Loot entries and loot collections.
pub mod loot;
/// Rooms, versions, and their branches.
pub mod room;
/// The story graph and its loader.
pub mod story;

/// Re-export condition types.
pub use condition::Conditions;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export loot types.
pub use loot::{Loot, LootEntry, LootKind};
/// Re-export room types.
pub use room::{Branch, Choice, DiceOutcome, Room, RoomVersion, Trigger};
/// Re-export the story graph.
pub use story::{DEFAULT_START_ROOM, StoryGraph};
