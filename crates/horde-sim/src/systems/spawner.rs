//! Enemy spawner: one enemy on a random arena edge every `spawn_every` seconds.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use horde_core::config::GameConfig;
use horde_core::types::Bounds;
use horde_core::world::World;

use crate::pipeline::{StageOutput, System};
use crate::world_setup;

pub struct Spawner {
    config: GameConfig,
    bounds: Bounds,
}

impl Spawner {
    pub fn new(config: GameConfig, bounds: Bounds) -> Self {
        Self { config, bounds }
    }
}

impl System for Spawner {
    fn name(&self) -> &'static str {
        "spawner"
    }

    fn run(&mut self, dt: f32, world: World) -> StageOutput {
        if world.resources().game_over {
            return StageOutput::pass(world);
        }

        let timer = world.resources().spawn_timer - dt;
        if timer > 0.0 {
            return StageOutput::pass(world.with_resources(|r| r.spawn_timer = timer));
        }

        // The RNG lives in the world as a u64 so the stage stays a pure
        // function of its input snapshot.
        let mut rng = ChaCha8Rng::seed_from_u64(world.resources().rng_state);
        let pos = world_setup::random_edge_point(&self.bounds, &mut rng);
        let rng_state: u64 = rng.gen();

        let (world, id) = world_setup::spawn_enemy(world, &self.config, pos);
        log::debug!(
            "spawned {id} at ({:.0}, {:.0}) with {} hp",
            pos.x,
            pos.y,
            self.config.enemy_hp_at(world.resources().elapsed)
        );

        let interval = self.config.spawn_every;
        StageOutput::pass(world.with_resources(|r| {
            r.spawn_timer = interval;
            r.rng_state = rng_state;
        }))
    }
}
