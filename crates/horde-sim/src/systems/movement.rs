//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt,
//! then clamps each axis into the arena.

use horde_core::components::{Position, Velocity};
use horde_core::enums::ComponentKind;
use horde_core::types::Bounds;
use horde_core::world::World;

use crate::pipeline::{StageOutput, System};

pub struct Movement {
    bounds: Bounds,
}

impl Movement {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

impl System for Movement {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn run(&mut self, dt: f32, world: World) -> StageOutput {
        if world.resources().game_over {
            return StageOutput::pass(world);
        }

        let movers = world.entities_with(&[ComponentKind::Position, ComponentKind::Velocity]);
        let world = movers.into_iter().fold(world, |w, id| {
            let next = match (w.get::<Position>(id), w.get::<Velocity>(id)) {
                (Some(p), Some(v)) => self.bounds.clamp(p.as_vec2() + v.as_vec2() * dt),
                _ => return w,
            };
            w.add_component(id, Position::from(next))
        });

        StageOutput::pass(world)
    }
}
