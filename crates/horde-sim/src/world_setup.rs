//! Entity spawn factories.
//!
//! Each prefab allocates an id and attaches its whole component bundle
//! before the world is handed on, so later systems never see a half-built
//! entity.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use horde_core::components::*;
use horde_core::config::GameConfig;
use horde_core::constants::*;
use horde_core::entity::EntityId;
use horde_core::enums::TagKind;
use horde_core::resources::Resources;
use horde_core::types::Bounds;
use horde_core::world::World;

/// A new game: fresh resources and one player in the middle of the arena.
pub fn initial_world(bounds: &Bounds, seed: u64) -> World {
    let world = World::new(Resources::new(seed));
    let (world, _player) = spawn_player(world, bounds.center());
    world
}

pub fn spawn_player(world: World, pos: Vec2) -> (World, EntityId) {
    let (world, id) = world.add_entity();
    let world = world
        .add_component(id, Tag::new(TagKind::Player))
        .add_component(id, Position::from(pos))
        .add_component(id, Velocity::zero())
        .add_component(
            id,
            Sprite {
                width: PLAYER_SPRITE_SIZE,
                height: PLAYER_SPRITE_SIZE,
                color: PLAYER_COLOR,
            },
        )
        .add_component(id, Collider { radius: PLAYER_RADIUS })
        .add_component(id, Health::full(PLAYER_MAX_HP));
    (world, id)
}

/// Which arena edge an enemy enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Point on this edge, `t` in 0..1 along it.
    pub fn point(self, bounds: &Bounds, t: f32) -> Vec2 {
        let along_x = bounds.min_x + t * bounds.width();
        let along_y = bounds.min_y + t * bounds.height();
        match self {
            Edge::Left => Vec2::new(bounds.min_x, along_y),
            Edge::Right => Vec2::new(bounds.max_x, along_y),
            Edge::Top => Vec2::new(along_x, bounds.min_y),
            Edge::Bottom => Vec2::new(along_x, bounds.max_y),
        }
    }
}

/// Uniform edge, uniform offset along it.
pub fn random_edge_point(bounds: &Bounds, rng: &mut ChaCha8Rng) -> Vec2 {
    let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
    let t: f32 = rng.gen_range(0.0..1.0);
    edge.point(bounds, t)
}

/// Spawn an enemy at `pos` with health ramped by the world's elapsed time.
pub fn spawn_enemy(world: World, cfg: &GameConfig, pos: Vec2) -> (World, EntityId) {
    let hp = cfg.enemy_hp_at(world.resources().elapsed);
    let (world, id) = world.add_entity();
    let world = world
        .add_component(id, Tag::new(TagKind::Enemy))
        .add_component(id, Position::from(pos))
        .add_component(id, Velocity::zero())
        .add_component(
            id,
            Sprite {
                width: ENEMY_SPRITE_SIZE,
                height: ENEMY_SPRITE_SIZE,
                color: ENEMY_COLOR,
            },
        )
        .add_component(id, Collider { radius: ENEMY_RADIUS })
        .add_component(id, Health::full(hp));
    (world, id)
}

pub fn spawn_bullet(world: World, cfg: &GameConfig, pos: Vec2, vel: Vec2) -> (World, EntityId) {
    let (world, id) = world.add_entity();
    let world = world
        .add_component(id, Tag::new(TagKind::Bullet))
        .add_component(id, Position::from(pos))
        .add_component(id, Velocity::from(vel))
        .add_component(
            id,
            Sprite {
                width: BULLET_SPRITE_SIZE,
                height: BULLET_SPRITE_SIZE,
                color: BULLET_COLOR,
            },
        )
        .add_component(id, Collider { radius: BULLET_RADIUS })
        .add_component(
            id,
            Lifetime {
                remaining: cfg.bullet_lifetime,
            },
        );
    (world, id)
}
