//! Elapsed play time. Stops counting while game over.

use horde_core::world::World;

use crate::pipeline::{StageOutput, System};

pub struct AdvanceTime;

impl System for AdvanceTime {
    fn name(&self) -> &'static str {
        "advance_time"
    }

    fn run(&mut self, dt: f32, world: World) -> StageOutput {
        if world.resources().game_over {
            return StageOutput::pass(world);
        }
        StageOutput::pass(world.with_resources(|r| r.elapsed += dt))
    }
}
