//! Apply-input stage: drains the input collaborator into the input resource.

use horde_core::world::World;

use crate::input::InputSource;
use crate::pipeline::{StageOutput, System};

pub struct ApplyInput {
    source: Box<dyn InputSource>,
}

impl ApplyInput {
    pub fn new(source: Box<dyn InputSource>) -> Self {
        Self { source }
    }
}

impl System for ApplyInput {
    fn name(&self) -> &'static str {
        "apply_input"
    }

    fn run(&mut self, _dt: f32, world: World) -> StageOutput {
        let frame = self.source.drain();
        let next = world.resources().input.merge(&frame);
        StageOutput::pass(world.with_resources(|r| r.input = next))
    }
}
