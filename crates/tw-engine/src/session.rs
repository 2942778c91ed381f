//! Game session management.
//!
//! A [`GameSession`] is the only long-lived mutable object: it owns the
//! current room id, the player state, the RNG, and the phase of the turn
//! machine. The story itself is shared read-only, so any number of sessions
//! can run side by side over one `Arc<StoryGraph>`.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use tw_core::{Branch, RoomVersion, StoryGraph};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{ActionRejected, EngineError, EngineResult};
use crate::journal::{Journal, JournalEntry};
use crate::player::PlayerState;
use crate::range;
use crate::transition::{ChoiceResolution, DiceResolution, Phase, TransitionEngine, Turn};
use crate::view::{OutcomePreview, Prompt, TurnView};

/// Unique identifier of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Handle for a requested but not yet committed roll.
///
/// Only the handle returned by the most recent [`GameSession::request_roll`]
/// can commit, and only once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRoll {
    id: Uuid,
    session: SessionId,
}

impl PendingRoll {
    /// The session that issued this handle.
    pub fn session(&self) -> SessionId {
        self.session
    }
}

/// An interactive play-through of a story.
pub struct GameSession {
    id: SessionId,
    graph: Arc<StoryGraph>,
    config: EngineConfig,
    current_room: String,
    player: PlayerState,
    phase: Phase,
    turn: Option<Turn>,
    rng: StdRng,
    journal: Journal,
}

impl GameSession {
    /// Start a session in the configured start room, or the story's own.
    pub fn new(graph: Arc<StoryGraph>, config: EngineConfig) -> Self {
        let current_room = config
            .start_room
            .clone()
            .unwrap_or_else(|| graph.start().to_string());
        let rng = config.rng();

        let mut session = Self {
            id: SessionId::new(),
            graph,
            config,
            current_room,
            player: PlayerState::new(),
            phase: Phase::Ended,
            turn: None,
            rng,
            journal: Journal::new(),
        };
        session.enter_current_room();
        session
    }

    /// The session ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The story being played.
    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    /// The session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Id of the room the player is in.
    pub fn current_room(&self) -> &str {
        &self.current_room
    }

    /// The player's accumulated loot.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The current phase of the turn machine.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The current turn, unless entering the room failed.
    pub fn turn(&self) -> Option<&Turn> {
        self.turn.as_ref()
    }

    /// The transitions committed so far.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The version on display, unless entering the room failed.
    pub fn current_version(&self) -> Option<&RoomVersion> {
        let turn = self.turn.as_ref()?;
        TransitionEngine::new(&self.graph).version(turn).ok()
    }

    /// What a renderer should show right now.
    pub fn view(&self) -> TurnView {
        let inventory: Vec<String> = self
            .player
            .items()
            .iter()
            .map(|e| e.inventory.clone())
            .filter(|text| !text.trim().is_empty())
            .collect();

        if let Phase::Failed(err) = &self.phase {
            return TurnView::failed(&self.current_room, err.to_string(), inventory);
        }
        let (Some(turn), Some(version)) = (self.turn.as_ref(), self.current_version()) else {
            let err = EngineError::RoomNotFound(self.current_room.clone());
            return TurnView::failed(&self.current_room, err.to_string(), inventory);
        };

        let prompt = match &version.branch {
            Branch::Choices(choices) => {
                Prompt::Choices(choices.iter().map(|c| c.text.clone()).collect())
            }
            Branch::Dice(outcomes) => Prompt::Dice {
                outcomes: outcomes
                    .iter()
                    .map(|o| OutcomePreview {
                        range: o.val.clone(),
                        text: o.text.clone(),
                    })
                    .collect(),
                rolling: matches!(self.phase, Phase::Rolling(_)),
            },
            Branch::End => Prompt::End,
        };

        TurnView {
            room_id: turn.room_id.clone(),
            version_index: Some(turn.version_index),
            lines: version.lines().map(String::from).collect(),
            flavor: version.flavor().map(String::from).collect(),
            inventory,
            prompt,
            diagnostics: turn.diagnostics.clone(),
        }
    }

    /// Take the choice at `index` (zero-based) and enter its target room.
    pub fn choose(&mut self, index: usize) -> EngineResult<ChoiceResolution> {
        if self.phase != Phase::AwaitingChoice {
            return Err(self.reject(ActionRejected::NotAwaitingChoice));
        }
        let Some(turn) = self.turn.as_ref() else {
            return Err(self.reject(ActionRejected::NotAwaitingChoice));
        };

        let engine = TransitionEngine::new(&self.graph);
        let resolution = match engine.apply_choice(turn, index, &mut self.player) {
            Ok(resolution) => resolution,
            Err(EngineError::Rejected(rejected)) => return Err(self.reject(rejected)),
            Err(err) => return Err(err),
        };

        self.journal.append(JournalEntry::Choice {
            from: turn.room_id.clone(),
            index,
            text: resolution.text.clone(),
            to: resolution.goto.clone(),
            timestamp: Utc::now(),
        });
        self.advance(&resolution.goto);
        Ok(resolution)
    }

    /// Start a roll. The returned handle must be passed to
    /// [`GameSession::commit_roll`] to finish the transition.
    pub fn request_roll(&mut self) -> EngineResult<PendingRoll> {
        match &self.phase {
            Phase::AwaitingRoll => {}
            Phase::Rolling(_) => return Err(self.reject(ActionRejected::RollInProgress)),
            _ => return Err(self.reject(ActionRejected::NotAwaitingRoll)),
        }

        let pending = PendingRoll {
            id: Uuid::new_v4(),
            session: self.id,
        };
        tracing::debug!(session = %self.id, "roll requested");
        self.phase = Phase::Rolling(pending.clone());
        Ok(pending)
    }

    /// Roll the die and finish the pending roll.
    ///
    /// A handle that is not the current pending roll (already committed,
    /// superseded, or from another session) is rejected without any state
    /// change.
    pub fn commit_roll(&mut self, handle: &PendingRoll) -> EngineResult<DiceResolution> {
        self.ensure_pending(handle)?;
        let roll = range::roll_die(&mut self.rng, self.config.die_sides);
        self.finish_roll(roll)
    }

    /// Finish the pending roll with a predetermined value.
    pub fn commit_roll_with(
        &mut self,
        handle: &PendingRoll,
        roll: u32,
    ) -> EngineResult<DiceResolution> {
        self.ensure_pending(handle)?;
        self.finish_roll(roll)
    }

    /// Clear the player's loot and go back to the start room.
    pub fn restart(&mut self) {
        self.player.clear();
        self.current_room = self
            .config
            .start_room
            .clone()
            .unwrap_or_else(|| self.graph.start().to_string());
        self.journal.append(JournalEntry::Restart {
            timestamp: Utc::now(),
        });
        tracing::debug!(session = %self.id, "restarted");
        self.enter_current_room();
    }

    fn ensure_pending(&self, handle: &PendingRoll) -> EngineResult<()> {
        match &self.phase {
            Phase::Rolling(pending) if pending == handle => Ok(()),
            _ => Err(self.reject(ActionRejected::StaleRoll)),
        }
    }

    fn finish_roll(&mut self, roll: u32) -> EngineResult<DiceResolution> {
        let Some(turn) = self.turn.as_ref() else {
            return Err(self.reject(ActionRejected::StaleRoll));
        };

        let engine = TransitionEngine::new(&self.graph);
        match engine.apply_roll(turn, roll, &mut self.player) {
            Ok(resolution) => {
                self.journal.append(JournalEntry::Roll {
                    from: turn.room_id.clone(),
                    roll,
                    text: resolution.text.clone(),
                    to: resolution.goto.clone(),
                    timestamp: Utc::now(),
                });
                self.advance(&resolution.goto);
                Ok(resolution)
            }
            Err(err) => {
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    fn advance(&mut self, goto: &str) {
        self.current_room = goto.to_string();
        self.enter_current_room();
    }

    fn enter_current_room(&mut self) {
        let engine = TransitionEngine::new(&self.graph);
        match engine.enter(&self.current_room, &mut self.player) {
            Ok(turn) => {
                self.phase = turn.opening.clone();
                self.turn = Some(turn);
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: EngineError) {
        tracing::error!(session = %self.id, room = %self.current_room, "{err}");
        self.turn = None;
        self.phase = Phase::Failed(err);
    }

    fn reject(&self, rejected: ActionRejected) -> EngineError {
        tracing::debug!(session = %self.id, phase = ?self.phase, "{rejected}");
        rejected.into()
    }
}
