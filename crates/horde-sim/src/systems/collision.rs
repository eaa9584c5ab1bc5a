//! Collision and combat resolution.
//!
//! Two phases per tick, both in ascending entity id order:
//!
//! 1. Bullet vs enemy. Every overlapping (bullet, enemy) pair is collected
//!    against the positions as they stood after movement, then resolved in
//!    bullet-major order. A bullet is spent on its first resolved pair; later
//!    pairs naming a spent bullet are skipped, so one bullet damages at most
//!    one enemy per tick.
//! 2. Enemy vs player. Every enemy still touching the player is removed at
//!    once and the player loses `playerDamagePerTouch` per contact.

use horde_core::components::{Collider, Health, Position};
use horde_core::config::GameConfig;
use horde_core::constants::*;
use horde_core::entity::EntityId;
use horde_core::enums::TagKind;
use horde_core::events::Effect;
use horde_core::world::World;

use crate::pipeline::{StageOutput, System};

pub struct Collision {
    config: GameConfig,
}

impl Collision {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

/// A bullet overlapping an enemy, found before any pair is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub bullet: EntityId,
    pub enemy: EntityId,
}

fn radius(world: &World, id: EntityId, fallback: f32) -> f32 {
    world.get::<Collider>(id).map_or(fallback, |c| c.radius)
}

fn overlaps(a: &Position, ra: f32, b: &Position, rb: f32) -> bool {
    a.distance_to(b) <= ra + rb
}

/// All overlapping pairs, bullets in id order, then enemies in id order.
pub fn detect_bullet_hits(world: &World) -> Vec<Hit> {
    let enemies: Vec<(EntityId, Position, f32)> = world
        .tag_ids(TagKind::Enemy)
        .into_iter()
        .filter_map(|id| {
            let pos = *world.get::<Position>(id)?;
            Some((id, pos, radius(world, id, FALLBACK_ENEMY_RADIUS)))
        })
        .collect();

    let mut hits = Vec::new();
    for bullet in world.tag_ids(TagKind::Bullet) {
        let bp = match world.get::<Position>(bullet) {
            Some(p) => *p,
            None => continue,
        };
        let br = radius(world, bullet, FALLBACK_BULLET_RADIUS);
        for (enemy, ep, er) in &enemies {
            if overlaps(&bp, br, ep, *er) {
                hits.push(Hit {
                    bullet,
                    enemy: *enemy,
                });
            }
        }
    }
    hits
}

/// Apply detected hits in order. Returns the world and the number of kills.
pub fn resolve_bullet_hits(world: World, hits: &[Hit], damage: i32) -> (World, u32) {
    let mut world = world;
    let mut kills = 0;
    for hit in hits {
        if !world.is_alive(hit.bullet) {
            continue;
        }
        world = world.remove_entity(hit.bullet);

        // The enemy may already have died to an earlier bullet this tick.
        if !world.is_alive(hit.enemy) {
            continue;
        }

        let health = world
            .get::<Health>(hit.enemy)
            .copied()
            .unwrap_or(Health::full(1));
        let hp = health.hp.saturating_sub(damage);
        if hp <= 0 {
            world = world
                .remove_entity(hit.enemy)
                .with_resources(|r| r.score += KILL_SCORE);
            kills += 1;
            log::debug!("{} killed {}", hit.bullet, hit.enemy);
        } else {
            world = world.add_component(hit.enemy, Health { hp, ..health });
        }
    }
    (world, kills)
}

/// Live enemies overlapping the player, ascending.
pub fn touching_enemies(world: &World, player_pos: &Position, player_radius: f32) -> Vec<EntityId> {
    world
        .tag_ids(TagKind::Enemy)
        .into_iter()
        .filter(|&id| match world.get::<Position>(id) {
            Some(ep) => overlaps(
                player_pos,
                player_radius,
                ep,
                radius(world, id, FALLBACK_ENEMY_RADIUS),
            ),
            None => false,
        })
        .collect()
}

impl System for Collision {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn run(&mut self, _dt: f32, world: World) -> StageOutput {
        if world.resources().game_over {
            return StageOutput::pass(world);
        }
        let player = match world.first_entity_with_tag(TagKind::Player) {
            Some(id) => id,
            None => return StageOutput::pass(world),
        };
        let player_pos = match world.get::<Position>(player) {
            Some(p) => *p,
            None => return StageOutput::pass(world),
        };
        let player_radius = radius(&world, player, FALLBACK_PLAYER_RADIUS);

        let hits = detect_bullet_hits(&world);
        let (world, kills) = resolve_bullet_hits(world, &hits, self.config.bullet_damage);
        if kills > 0 {
            log::debug!(
                "{kills} kills from {} hits, score {}",
                hits.len(),
                world.resources().score
            );
        }

        let touching = touching_enemies(&world, &player_pos, player_radius);
        if touching.is_empty() {
            return StageOutput::pass(world);
        }

        let contacts = touching.len();
        let world = touching
            .into_iter()
            .fold(world, |w, id| w.remove_entity(id));

        let health = match world.get::<Health>(player) {
            Some(h) => *h,
            None => return StageOutput::pass(world),
        };
        let damage = (contacts as i32).saturating_mul(self.config.player_damage_per_touch);
        let hp = health.hp.saturating_sub(damage).max(0);
        log::debug!("player touched by {contacts} enemies, hp {} -> {hp}", health.hp);

        let world = world.add_component(player, Health { hp, ..health });
        if hp > 0 {
            return StageOutput::pass(world);
        }

        let world = world.with_resources(|r| r.game_over = true);
        let score = world.resources().score;
        log::info!("game over, score {score}");
        StageOutput::with_effects(world, vec![Effect::GameOver { score }])
    }
}
