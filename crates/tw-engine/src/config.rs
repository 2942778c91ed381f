//! Configuration for a game session.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Faces on the die used for dice tables unless configured otherwise.
pub const DEFAULT_DIE_SIDES: u32 = 6;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Number of faces on the die.
    pub die_sides: u32,
    /// Room to start in instead of the story's own start room.
    pub start_room: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            die_sides: DEFAULT_DIE_SIDES,
            start_room: None,
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of die faces (at least 1).
    pub fn with_die_sides(mut self, sides: u32) -> Self {
        self.die_sides = sides.max(1);
        self
    }

    /// Override the start room.
    pub fn with_start_room(mut self, room: impl Into<String>) -> Self {
        self.start_room = Some(room.into());
        self
    }

    /// Build the session RNG.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
