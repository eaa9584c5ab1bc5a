//! Player control: steering from held keys, firing toward the pointer.

use glam::Vec2;

use horde_core::components::{Position, Velocity};
use horde_core::config::GameConfig;
use horde_core::enums::{Key, TagKind};
use horde_core::input::InputState;
use horde_core::world::World;

use crate::pipeline::{StageOutput, System};
use crate::world_setup;

pub struct PlayerControl {
    config: GameConfig,
}

impl PlayerControl {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

/// Unit direction from opposed key pairs, zero when nothing (or both) held.
pub fn movement_direction(input: &InputState) -> Vec2 {
    let axis = |pos: fn(Key) -> bool, neg: fn(Key) -> bool| {
        (input.any(pos) as i32 - input.any(neg) as i32) as f32
    };
    Vec2::new(axis(Key::is_right, Key::is_left), axis(Key::is_down, Key::is_up)).normalize_or_zero()
}

impl System for PlayerControl {
    fn name(&self) -> &'static str {
        "player_control"
    }

    fn run(&mut self, dt: f32, world: World) -> StageOutput {
        if world.resources().game_over {
            return StageOutput::pass(world);
        }
        let player = match world.first_entity_with_tag(TagKind::Player) {
            Some(id) => id,
            None => return StageOutput::pass(world),
        };

        let input = world.resources().input.clone();
        let dir = movement_direction(&input);
        let mut world = world.add_component(player, Velocity::from(dir * self.config.player_speed));

        let ready = world.resources().cooldown <= 0.0;
        let origin = world.get::<Position>(player).map(Position::as_vec2);
        if let Some(origin) = origin.filter(|_| ready && input.wants_fire()) {
            let target = Vec2::new(input.pointer.x, input.pointer.y);
            let aim = (target - origin).normalize_or_zero();
            let (next, bullet) =
                world_setup::spawn_bullet(world, &self.config, origin, aim * self.config.bullet_speed);
            log::debug!("player fired {bullet} toward ({:.0}, {:.0})", target.x, target.y);
            let cooldown = self.config.shoot_cooldown;
            world = next.with_resources(|r| r.cooldown = cooldown);
        }

        let cooldown = world.resources().cooldown;
        if cooldown > 0.0 {
            world = world.with_resources(|r| r.cooldown = (cooldown - dt).max(0.0));
        }

        StageOutput::pass(world)
    }
}
