//! Lifetime expiry: counts down every Lifetime and removes entities at zero.

use horde_core::components::Lifetime;
use horde_core::enums::ComponentKind;
use horde_core::world::World;

use crate::pipeline::{StageOutput, System};

pub struct LifetimeExpiry;

impl System for LifetimeExpiry {
    fn name(&self) -> &'static str {
        "lifetime_expiry"
    }

    fn run(&mut self, dt: f32, world: World) -> StageOutput {
        if world.resources().game_over {
            return StageOutput::pass(world);
        }

        let mortal = world.entities_with(&[ComponentKind::Lifetime]);
        let world = mortal.into_iter().fold(world, |w, id| {
            let remaining = match w.get::<Lifetime>(id) {
                Some(lt) => lt.remaining - dt,
                None => return w,
            };
            if remaining <= 0.0 {
                w.remove_entity(id)
            } else {
                w.add_component(id, Lifetime { remaining })
            }
        });

        StageOutput::pass(world)
    }
}
