//! Reset application: replaces the whole world with a fresh initial one.

use horde_core::types::Bounds;
use horde_core::world::World;

use crate::pipeline::{StageOutput, System};
use crate::world_setup;

pub struct ApplyReset {
    bounds: Bounds,
}

impl ApplyReset {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

impl System for ApplyReset {
    fn name(&self) -> &'static str {
        "apply_reset"
    }

    fn run(&mut self, _dt: f32, world: World) -> StageOutput {
        if !world.resources().reset_requested {
            return StageOutput::pass(world);
        }
        // Only the RNG stream position carries over into the new game.
        let seed = world.resources().rng_state;
        log::info!("restarting game (final score {})", world.resources().score);
        StageOutput::pass(world_setup::initial_world(&self.bounds, seed))
    }
}
