//! Render request: always the last stage, emits the tick's final snapshot.

use horde_core::events::Effect;
use horde_core::world::World;

use crate::pipeline::{StageOutput, System};

pub struct RenderRequest;

impl System for RenderRequest {
    fn name(&self) -> &'static str {
        "render_request"
    }

    fn run(&mut self, _dt: f32, world: World) -> StageOutput {
        let effect = Effect::Render {
            world: world.clone(),
        };
        StageOutput::with_effects(world, vec![effect])
    }
}
