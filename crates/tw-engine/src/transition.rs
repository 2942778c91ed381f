//! Per-turn transition logic.
//!
//! A turn starts when a room is entered: the applicable version is resolved,
//! its trigger runs, and its loot is auto-looted. The turn then waits for a
//! choice or a roll, which grants that option's loot and names the next
//! room. [`TransitionEngine`] does the work against explicitly passed player
//! state; [`crate::GameSession`] owns the state and drives the [`Phase`]
//! machine.

use tw_core::{Branch, LootKind, RoomVersion, StoryGraph, Trigger};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{ActionRejected, EngineError, EngineResult};
use crate::loot;
use crate::player::PlayerState;
use crate::range;
use crate::resolver;
use crate::session::PendingRoll;

/// Where a session stands between player actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The turn offers choices.
    AwaitingChoice,
    /// The turn offers a dice table and no roll has been requested.
    AwaitingRoll,
    /// A roll has been requested and waits to be committed.
    Rolling(PendingRoll),
    /// The current version offers nothing further.
    Ended,
    /// The turn could not be resolved.
    Failed(EngineError),
}

impl Phase {
    /// The phase a turn opens in, given its version's branch.
    pub fn for_branch(branch: &Branch) -> Self {
        match branch {
            Branch::Dice(_) => Self::AwaitingRoll,
            Branch::Choices(_) => Self::AwaitingChoice,
            Branch::End => Self::Ended,
        }
    }

    /// Whether the session can make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::Failed(_))
    }
}

/// A resolved turn: which version of which room is on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// The room entered.
    pub room_id: String,
    /// Index of the displayed version within the room.
    pub version_index: usize,
    /// The phase the turn opened in.
    pub opening: Phase,
    /// Diagnostics gathered while entering.
    pub diagnostics: Vec<Diagnostic>,
}

/// The result of committing a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceResolution {
    /// Zero-based index of the choice.
    pub index: usize,
    /// Choice text.
    pub text: String,
    /// Room to enter next.
    pub goto: String,
}

/// The result of committing a roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceResolution {
    /// The rolled value.
    pub roll: u32,
    /// Text of the resolved outcome.
    pub text: String,
    /// Room to enter next.
    pub goto: String,
    /// Diagnostics gathered while resolving the roll.
    pub diagnostics: Vec<Diagnostic>,
}

/// Applies turns against a story graph.
#[derive(Debug, Clone, Copy)]
pub struct TransitionEngine<'g> {
    graph: &'g StoryGraph,
}

impl<'g> TransitionEngine<'g> {
    /// Create an engine over a story.
    pub fn new(graph: &'g StoryGraph) -> Self {
        Self { graph }
    }

    /// Enter a room: resolve its version, apply the trigger, auto-loot.
    pub fn enter(&self, room_id: &str, player: &mut PlayerState) -> EngineResult<Turn> {
        let room = self
            .graph
            .room(room_id)
            .ok_or_else(|| EngineError::RoomNotFound(room_id.to_string()))?;

        let mut diagnostics = Diagnostics::new();
        let resolved = resolver::resolve(room, player, &mut diagnostics)?;
        let version = resolved.version;

        match &version.trigger {
            Some(Trigger::ResetAll) => {
                tracing::debug!(room = %room.id, "reset_all: clearing player state");
                player.clear();
            }
            Some(Trigger::Other(name)) => diagnostics.push(Diagnostic::UnknownTrigger {
                room: room.id.clone(),
                trigger: name.clone(),
            }),
            None => {}
        }

        loot::autoloot(&version.loot, player.loot_mut(), &LootKind::ALL);

        tracing::debug!(room = %room.id, version = resolved.index, "entered room");

        Ok(Turn {
            room_id: room.id.clone(),
            version_index: resolved.index,
            opening: Phase::for_branch(&version.branch),
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// The version a turn displays.
    pub fn version(&self, turn: &Turn) -> EngineResult<&'g RoomVersion> {
        self.graph
            .room(&turn.room_id)
            .and_then(|room| room.versions.get(turn.version_index))
            .ok_or_else(|| EngineError::RoomNotFound(turn.room_id.clone()))
    }

    /// Commit a choice of the displayed version: auto-loot the choice, then
    /// apply its get/remove commands against the displayed version.
    pub fn apply_choice(
        &self,
        turn: &Turn,
        index: usize,
        player: &mut PlayerState,
    ) -> EngineResult<ChoiceResolution> {
        let version = self.version(turn)?;
        let Branch::Choices(choices) = &version.branch else {
            return Err(ActionRejected::NotAwaitingChoice.into());
        };
        let choice = choices.get(index).ok_or(ActionRejected::InvalidChoice {
            index,
            available: choices.len(),
        })?;

        tracing::debug!(room = %turn.room_id, index, goto = %choice.goto, "choice selected");

        loot::autoloot(&choice.loot, player.loot_mut(), &LootKind::ALL);
        loot::apply_manual_commands(choice, player, version);

        Ok(ChoiceResolution {
            index,
            text: choice.text.clone(),
            goto: choice.goto.clone(),
        })
    }

    /// Commit a roll against the displayed dice table and auto-loot the
    /// resolved outcome.
    pub fn apply_roll(
        &self,
        turn: &Turn,
        roll: u32,
        player: &mut PlayerState,
    ) -> EngineResult<DiceResolution> {
        let version = self.version(turn)?;
        let Branch::Dice(outcomes) = &version.branch else {
            return Err(ActionRejected::NotAwaitingRoll.into());
        };

        let mut diagnostics = Diagnostics::new();
        let outcome = range::resolve_roll(roll, outcomes, &mut diagnostics)
            .ok_or_else(|| EngineError::EmptyDiceTable(turn.room_id.clone()))?;

        tracing::debug!(room = %turn.room_id, roll, goto = %outcome.goto, "roll resolved");

        loot::autoloot(&outcome.loot, player.loot_mut(), &LootKind::ALL);

        Ok(DiceResolution {
            roll,
            text: outcome.text.clone(),
            goto: outcome.goto.clone(),
            diagnostics: diagnostics.into_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_core::{Choice, Conditions, DiceOutcome, Loot, LootEntry, Room};

    fn story() -> StoryGraph {
        StoryGraph::new(vec![
            Room::new("0").with_version(
                RoomVersion::new("A shed.")
                    .with_item(LootEntry::new("lantern").manual())
                    .with_achievement(LootEntry::new("met_guide"))
                    .with_choice(Choice::new("go north", "1").with_get(LootKind::Item, "lantern"))
                    .with_choice(Choice::new("wait", "0")),
            ),
            Room::new("1")
                .with_version(
                    RoomVersion::new("Dark.")
                        .with_conditions(Conditions::new().forbid_item("lantern")),
                )
                .with_version(
                    RoomVersion::new("Lit.")
                        .with_outcome(DiceOutcome::new("1-3", "slip", "0"))
                        .with_outcome(
                            DiceOutcome::new("4-6", "climb", "2")
                                .with_achievement(LootEntry::new("climber")),
                        ),
                ),
            Room::new("2").with_version(
                RoomVersion::new("Reset.").with_trigger(Trigger::ResetAll),
            ),
            Room::new("3").with_version(
                RoomVersion::new("Odd.").with_trigger(Trigger::Other("boom".to_string())),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn enter_autoloots_version() {
        let story = story();
        let engine = TransitionEngine::new(&story);
        let mut player = PlayerState::new();

        let turn = engine.enter("0", &mut player).unwrap();
        assert_eq!(turn.version_index, 0);
        assert_eq!(turn.opening, Phase::AwaitingChoice);
        assert!(player.has_label(LootKind::Achievement, "met_guide"));
        assert!(!player.has_label(LootKind::Item, "lantern"));
    }

    #[test]
    fn choice_applies_get_command() {
        let story = story();
        let engine = TransitionEngine::new(&story);
        let mut player = PlayerState::new();
        let turn = engine.enter("0", &mut player).unwrap();

        let res = engine.apply_choice(&turn, 0, &mut player).unwrap();
        assert_eq!(res.goto, "1");
        assert_eq!(player.count_label(LootKind::Item, "lantern"), 1);

        let next = engine.enter(&res.goto, &mut player).unwrap();
        assert_eq!(next.version_index, 1);
        assert_eq!(next.opening, Phase::AwaitingRoll);
    }

    #[test]
    fn invalid_choice_rejected() {
        let story = story();
        let engine = TransitionEngine::new(&story);
        let mut player = PlayerState::new();
        let turn = engine.enter("0", &mut player).unwrap();
        let before = player.clone();

        let err = engine.apply_choice(&turn, 5, &mut player).unwrap_err();
        assert_eq!(
            err,
            EngineError::Rejected(ActionRejected::InvalidChoice {
                index: 5,
                available: 2
            })
        );
        assert_eq!(player, before);

        let err = engine.apply_roll(&turn, 3, &mut player).unwrap_err();
        assert_eq!(err, EngineError::Rejected(ActionRejected::NotAwaitingRoll));
    }

    #[test]
    fn roll_autoloots_outcome() {
        let story = story();
        let engine = TransitionEngine::new(&story);
        let mut player = PlayerState::from_loot(Loot {
            items: vec![LootEntry::new("lantern")],
            achievements: Vec::new(),
        });
        let turn = engine.enter("1", &mut player).unwrap();

        let res = engine.apply_roll(&turn, 4, &mut player).unwrap();
        assert_eq!(res.goto, "2");
        assert_eq!(res.text, "climb");
        assert!(player.has_label(LootKind::Achievement, "climber"));

        let err = engine.apply_choice(&turn, 0, &mut player).unwrap_err();
        assert!(err.is_rejection());
    }

    #[test]
    fn reset_all_clears_state() {
        let story = story();
        let engine = TransitionEngine::new(&story);
        let mut player = PlayerState::from_loot(Loot {
            items: vec![LootEntry::new("a"), LootEntry::new("b")],
            achievements: vec![LootEntry::new("c")],
        });
        let turn = engine.enter("2", &mut player).unwrap();
        assert!(player.is_empty());
        assert_eq!(turn.opening, Phase::Ended);
    }

    #[test]
    fn unknown_trigger_is_diagnosed() {
        let story = story();
        let engine = TransitionEngine::new(&story);
        let mut player = PlayerState::new();
        let turn = engine.enter("3", &mut player).unwrap();
        assert_eq!(
            turn.diagnostics,
            vec![Diagnostic::UnknownTrigger {
                room: "3".to_string(),
                trigger: "boom".to_string(),
            }]
        );
    }

    #[test]
    fn missing_room_is_an_error() {
        let story = story();
        let engine = TransitionEngine::new(&story);
        let err = engine.enter("99", &mut PlayerState::new()).unwrap_err();
        assert_eq!(err, EngineError::RoomNotFound("99".to_string()));
    }

    #[test]
    fn phase_for_branch() {
        assert_eq!(Phase::for_branch(&Branch::End), Phase::Ended);
        assert!(Phase::Ended.is_terminal());
        assert!(Phase::Failed(EngineError::RoomNotFound("x".into())).is_terminal());
        assert!(!Phase::AwaitingRoll.is_terminal());
    }
}
