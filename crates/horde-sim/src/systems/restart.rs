//! Restart detection: a restart key or a click while game over requests a reset.

use horde_core::world::World;

use crate::pipeline::{StageOutput, System};

pub struct RestartDetect;

impl System for RestartDetect {
    fn name(&self) -> &'static str {
        "restart_detect"
    }

    fn run(&mut self, _dt: f32, world: World) -> StageOutput {
        let res = world.resources();
        if !res.game_over || !res.input.wants_restart() {
            return StageOutput::pass(world);
        }
        StageOutput::pass(world.with_resources(|r| r.reset_requested = true))
    }
}
