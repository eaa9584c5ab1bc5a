//! Enemy AI: every enemy homes straight at the player.

use horde_core::components::{Position, Velocity};
use horde_core::config::GameConfig;
use horde_core::enums::TagKind;
use horde_core::world::World;

use crate::pipeline::{StageOutput, System};

pub struct EnemyAi {
    config: GameConfig,
}

impl EnemyAi {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl System for EnemyAi {
    fn name(&self) -> &'static str {
        "enemy_ai"
    }

    fn run(&mut self, _dt: f32, world: World) -> StageOutput {
        if world.resources().game_over {
            return StageOutput::pass(world);
        }
        let target = match world
            .first_entity_with_tag(TagKind::Player)
            .and_then(|pid| world.get::<Position>(pid))
        {
            Some(p) => p.as_vec2(),
            None => return StageOutput::pass(world),
        };

        let speed = self.config.enemy_speed;
        let enemies = world.tag_ids(TagKind::Enemy);
        let world = enemies.into_iter().fold(world, |w, id| {
            let heading = match w.get::<Position>(id) {
                Some(p) => (target - p.as_vec2()).normalize_or_zero(),
                None => return w,
            };
            w.add_component(id, Velocity::from(heading * speed))
        });

        StageOutput::pass(world)
    }
}
