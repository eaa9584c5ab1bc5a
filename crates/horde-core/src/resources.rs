//! Global values carried by every world snapshot.

use serde::{Deserialize, Serialize};

use crate::input::InputState;

/// Values not tied to any single entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    /// Input as of the current tick.
    pub input: InputState,
    pub score: u32,
    /// Seconds until the player may fire again.
    pub cooldown: f32,
    /// Seconds until the next enemy spawn.
    pub spawn_timer: f32,
    /// Seconds of live (non game-over) play.
    pub elapsed: f32,
    pub game_over: bool,
    pub reset_requested: bool,
    /// Spawner RNG stream position. Advanced on every spawn.
    pub rng_state: u64,
}

impl Resources {
    /// Fresh resources for a new game.
    pub fn new(seed: u64) -> Self {
        Self {
            rng_state: seed,
            ..Default::default()
        }
    }
}
