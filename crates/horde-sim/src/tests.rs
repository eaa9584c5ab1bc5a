//! Tests for the gameplay systems, pipeline ordering and tick driver.

use std::sync::mpsc;

use glam::Vec2;
use proptest::prelude::*;

use horde_core::components::*;
use horde_core::config::{DriverConfig, GameConfig, Settings};
use horde_core::entity::EntityId;
use horde_core::enums::{ComponentKind, Key, TagKind};
use horde_core::events::Effect;
use horde_core::input::{InputEvent, PointerState};
use horde_core::resources::Resources;
use horde_core::state::FrameView;
use horde_core::types::Bounds;
use horde_core::world::World;

use crate::engine::{EffectLog, Engine, EngineError};
use crate::input::{ChannelInput, NoInput};
use crate::pipeline::{standard_pipeline, Pipeline, StageOutput, System};
use crate::systems::collision::{self, Collision};
use crate::systems::enemy_ai::EnemyAi;
use crate::systems::lifetime::LifetimeExpiry;
use crate::systems::movement::Movement;
use crate::systems::player_control::PlayerControl;
use crate::systems::reset::ApplyReset;
use crate::systems::restart::RestartDetect;
use crate::systems::spawner::Spawner;
use crate::systems::time::AdvanceTime;
use crate::world_setup::{self, Edge};

const DT: f32 = 1.0 / 60.0;

fn cfg() -> GameConfig {
    GameConfig::default()
}

fn bounds() -> Bounds {
    Bounds::default()
}

fn empty_world() -> World {
    World::new(Resources::new(7))
}

fn with_player(world: World, x: f32, y: f32) -> (World, EntityId) {
    world_setup::spawn_player(world, Vec2::new(x, y))
}

fn with_enemy(world: World, x: f32, y: f32) -> (World, EntityId) {
    world_setup::spawn_enemy(world, &cfg(), Vec2::new(x, y))
}

fn with_bullet(world: World, x: f32, y: f32) -> (World, EntityId) {
    world_setup::spawn_bullet(world, &cfg(), Vec2::new(x, y), Vec2::ZERO)
}

fn hp(world: &World, id: EntityId) -> i32 {
    world.get::<Health>(id).map_or(-1, |h| h.hp)
}

fn assert_gone(world: &World, id: EntityId) {
    assert!(!world.is_alive(id), "{id} should be removed");
    for kind in ComponentKind::ALL {
        assert!(!world.has(kind, id), "{id} left a {kind:?} row behind");
    }
}

/// Player in the middle, one enemy on the left edge, a bullet in flight.
fn busy_world() -> World {
    let (world, _) = with_player(empty_world(), 480.0, 346.0);
    let (world, _) = with_enemy(world, 18.0, 200.0);
    let (world, b) = with_bullet(world, 600.0, 300.0);
    world.add_component(b, Velocity::new(100.0, 0.0))
}

fn engine_with(world: World) -> (Engine, mpsc::Sender<InputEvent>) {
    let (tx, input) = ChannelInput::channel();
    let settings = Settings::default();
    let mut engine = Engine::from_settings(&settings, Box::new(input));
    engine.start(world, 0.0).unwrap();
    (engine, tx)
}

// ---- Pipeline ----

#[test]
fn test_standard_pipeline_order() {
    let pipeline = standard_pipeline(&Settings::default(), Box::new(NoInput));
    assert_eq!(
        pipeline.names(),
        vec![
            "apply_input",
            "restart_detect",
            "apply_reset",
            "advance_time",
            "player_control",
            "enemy_ai",
            "spawner",
            "movement",
            "collision",
            "lifetime_expiry",
            "render_request",
        ]
    );
}

struct Mark(u32);

impl System for Mark {
    fn name(&self) -> &'static str {
        "mark"
    }

    fn run(&mut self, _dt: f32, world: World) -> StageOutput {
        let n = self.0;
        let world = world.with_resources(|r| r.score = r.score * 10 + n);
        StageOutput::with_effects(world, vec![Effect::GameOver { score: n }])
    }
}

#[test]
fn test_pipeline_threads_world_and_orders_effects() {
    let mut pipeline = Pipeline::new().with(Mark(1)).with(Mark(2)).with(Mark(3));
    let out = pipeline.run(DT, empty_world());
    assert_eq!(out.world.resources().score, 123);
    assert_eq!(
        out.effects,
        vec![
            Effect::GameOver { score: 1 },
            Effect::GameOver { score: 2 },
            Effect::GameOver { score: 3 },
        ]
    );
}

#[test]
fn test_pipeline_leaves_input_snapshot_untouched() {
    let settings = Settings::default();
    let mut pipeline = standard_pipeline(&settings, Box::new(NoInput));
    let world = Engine::initial_world(&settings);
    let kept = world.clone();

    let out = pipeline.run(DT, world);
    assert_ne!(out.world, kept);
    assert_eq!(kept, Engine::initial_world(&settings));
}

// ---- Game over freezes gameplay ----

#[test]
fn test_gameplay_systems_are_noops_when_game_over() {
    let world = busy_world().with_resources(|r| {
        r.game_over = true;
        r.cooldown = 0.1;
        r.spawn_timer = 0.0;
        r.input.held.insert(Key::KeyD);
        r.input.pointer.clicked = true;
    });

    let systems: Vec<Box<dyn System>> = vec![
        Box::new(AdvanceTime),
        Box::new(PlayerControl::new(cfg())),
        Box::new(EnemyAi::new(cfg())),
        Box::new(Spawner::new(cfg(), bounds())),
        Box::new(Movement::new(bounds())),
        Box::new(Collision::new(cfg())),
        Box::new(LifetimeExpiry),
        Box::new(ApplyReset::new(bounds())),
    ];
    for mut system in systems {
        let out = system.run(DT, world.clone());
        assert_eq!(out.world, world, "{} changed a game-over world", system.name());
        assert!(out.effects.is_empty());
    }
}

#[test]
fn test_game_over_tick_then_frozen_tick() {
    let (world, player) = with_player(empty_world(), 480.0, 346.0);
    let world = world.add_component(player, Health { hp: 1, max_hp: 5 });
    let (world, enemy) = with_enemy(world, 480.0, 346.0);
    let (mut engine, _tx) = engine_with(world);

    let mut log = EffectLog::default();
    engine.advance(DT, &mut log).unwrap();
    let dead = engine.world().unwrap().clone();
    assert!(dead.resources().game_over);
    assert_eq!(hp(&dead, player), 0);
    assert_gone(&dead, enemy);
    assert!(log.0.contains(&Effect::GameOver { score: 0 }));

    engine.advance(DT, &mut log).unwrap();
    engine.advance(0.5, &mut log).unwrap();
    let frozen = engine.world().unwrap();
    assert_eq!(frozen, &dead);
}

// ---- Restart and reset ----

#[test]
fn test_restart_only_detected_while_game_over() {
    let world = busy_world().with_resources(|r| {
        r.input.held.insert(Key::KeyR);
    });
    let out = RestartDetect.run(DT, world.clone());
    assert!(!out.world.resources().reset_requested);

    let over = world.with_resources(|r| r.game_over = true);
    let out = RestartDetect.run(DT, over);
    assert!(out.world.resources().reset_requested);
}

#[test]
fn test_restart_by_click() {
    let world = busy_world().with_resources(|r| {
        r.game_over = true;
        r.input.pointer = PointerState {
            clicked: true,
            ..Default::default()
        };
    });
    let out = RestartDetect.run(DT, world);
    assert!(out.world.resources().reset_requested);
}

#[test]
fn test_reset_restores_clean_state() {
    let world = busy_world().with_resources(|r| {
        r.game_over = true;
        r.reset_requested = true;
        r.score = 120;
        r.elapsed = 33.0;
        r.rng_state = 999;
    });
    let out = ApplyReset::new(bounds()).run(DT, world);
    let fresh = out.world;

    assert_eq!(fresh.entity_count(), 1);
    let player = fresh.first_entity_with_tag(TagKind::Player).unwrap();
    assert_eq!(fresh.get::<Health>(player), Some(&Health::full(5)));
    assert_eq!(fresh.get::<Position>(player).unwrap().as_vec2(), bounds().center());
    let res = fresh.resources();
    assert_eq!(res.score, 0);
    assert!(!res.game_over);
    assert!(!res.reset_requested);
    assert_eq!(res.elapsed, 0.0);
    assert_eq!(res.rng_state, 999);
}

#[test]
fn test_restart_key_resets_through_engine() {
    let (world, player) = with_player(empty_world(), 480.0, 346.0);
    let world = world.add_component(player, Health { hp: 1, max_hp: 5 });
    let (world, _) = with_enemy(world, 480.0, 346.0);
    let (mut engine, tx) = engine_with(world);
    let mut log = EffectLog::default();

    engine.advance(DT, &mut log).unwrap();
    assert!(engine.world().unwrap().resources().game_over);

    tx.send(InputEvent::KeyDown { key: Key::KeyR }).unwrap();
    engine.advance(DT, &mut log).unwrap();

    let world = engine.world().unwrap();
    let res = world.resources();
    assert!(!res.game_over);
    assert!(!res.reset_requested);
    assert_eq!(res.score, 0);
    let players = world.tag_ids(TagKind::Player);
    assert_eq!(players.len(), 1);
    assert_eq!(hp(world, players[0]), 5);
}

// ---- Time ----

#[test]
fn test_time_accumulates() {
    let mut time = AdvanceTime;
    let world = time.run(0.25, empty_world()).world;
    let world = time.run(0.5, world).world;
    assert!((world.resources().elapsed - 0.75).abs() < 1e-6);
}

// ---- Player control ----

fn aiming_world(pointer: Vec2) -> (World, EntityId) {
    let (world, player) = with_player(empty_world(), 480.0, 346.0);
    let world = world.with_resources(|r| {
        r.input.pointer = PointerState {
            x: pointer.x,
            y: pointer.y,
            down: true,
            clicked: true,
        };
    });
    (world, player)
}

#[test]
fn test_held_keys_set_player_velocity() {
    let (world, player) = with_player(empty_world(), 480.0, 346.0);
    let world = world.with_resources(|r| {
        r.input.held.insert(Key::KeyD);
    });
    let out = PlayerControl::new(cfg()).run(DT, world);
    assert_eq!(out.world.get::<Velocity>(player), Some(&Velocity::new(260.0, 0.0)));
}

#[test]
fn test_fire_spawns_bullet_toward_pointer() {
    let (world, player) = aiming_world(Vec2::new(580.0, 346.0));
    let out = PlayerControl::new(cfg()).run(0.01, world);
    let world = out.world;

    let bullets = world.tag_ids(TagKind::Bullet);
    assert_eq!(bullets.len(), 1);
    let b = bullets[0];
    assert!(b > player);
    assert_eq!(world.get::<Position>(b), world.get::<Position>(player));
    let v = world.get::<Velocity>(b).unwrap();
    assert!((v.speed() - 520.0).abs() < 1e-3);
    assert!(v.y.abs() < 1e-3);
    assert_eq!(world.get::<Lifetime>(b), Some(&Lifetime { remaining: 0.95 }));
    assert!((world.resources().cooldown - 0.17).abs() < 1e-6);
}

#[test]
fn test_cooldown_blocks_second_shot_and_decays() {
    let (world, _) = aiming_world(Vec2::new(580.0, 346.0));
    let mut control = PlayerControl::new(cfg());
    let world = control.run(0.01, world).world;
    let world = control.run(0.01, world).world;
    assert_eq!(world.tag_ids(TagKind::Bullet).len(), 1);
    assert!((world.resources().cooldown - 0.16).abs() < 1e-6);
}

#[test]
fn test_cooldown_floors_at_zero() {
    let (world, _) = with_player(empty_world(), 480.0, 346.0);
    let world = world.with_resources(|r| r.cooldown = 0.005);
    let out = PlayerControl::new(cfg()).run(0.01, world);
    assert_eq!(out.world.resources().cooldown, 0.0);
}

#[test]
fn test_fire_key_without_click() {
    let (world, _) = with_player(empty_world(), 480.0, 346.0);
    let world = world.with_resources(|r| {
        r.input.held.insert(Key::Space);
        r.input.pointer.x = 480.0;
        r.input.pointer.y = 100.0;
    });
    let world = PlayerControl::new(cfg()).run(DT, world).world;
    let b = world.tag_ids(TagKind::Bullet)[0];
    let v = world.get::<Velocity>(b).unwrap();
    assert!(v.x.abs() < 1e-3);
    assert!((v.y + 520.0).abs() < 1e-3);
}

#[test]
fn test_pointer_on_player_fires_stationary_bullet() {
    let (world, _) = aiming_world(Vec2::new(480.0, 346.0));
    let world = PlayerControl::new(cfg()).run(DT, world).world;
    let b = world.tag_ids(TagKind::Bullet)[0];
    let v = world.get::<Velocity>(b).unwrap();
    assert_eq!(*v, Velocity::zero());
    assert!(v.x.is_finite() && v.y.is_finite());
}

#[test]
fn test_player_control_without_player_is_noop() {
    let world = empty_world().with_resources(|r| {
        r.input.held.insert(Key::Space);
        r.cooldown = 0.1;
    });
    let out = PlayerControl::new(cfg()).run(DT, world.clone());
    assert_eq!(out.world, world);
}

// ---- Enemy AI ----

#[test]
fn test_enemies_home_on_player() {
    let (world, _) = with_player(empty_world(), 100.0, 100.0);
    let (world, e1) = with_enemy(world, 100.0, 200.0);
    let (world, e2) = with_enemy(world, 100.0, 100.0);
    let world = EnemyAi::new(cfg()).run(DT, world).world;

    let v = world.get::<Velocity>(e1).unwrap();
    assert!(v.x.abs() < 1e-4);
    assert!((v.y + 120.0).abs() < 1e-4);
    assert_eq!(world.get::<Velocity>(e2), Some(&Velocity::zero()));
}

#[test]
fn test_enemy_ai_without_player_is_noop() {
    let (world, _) = with_enemy(empty_world(), 100.0, 200.0);
    let out = EnemyAi::new(cfg()).run(DT, world.clone());
    assert_eq!(out.world, world);
}

// ---- Spawner ----

fn on_edge(b: &Bounds, p: &Position) -> bool {
    p.x == b.min_x || p.x == b.max_x || p.y == b.min_y || p.y == b.max_y
}

#[test]
fn test_spawner_counts_down_then_spawns() {
    let mut spawner = Spawner::new(cfg(), bounds());
    let world = empty_world();
    let seed = world.resources().rng_state;

    let world = spawner.run(0.1, world).world;
    let enemies = world.tag_ids(TagKind::Enemy);
    assert_eq!(enemies.len(), 1);
    assert_eq!(world.resources().spawn_timer, 1.05);
    assert_ne!(world.resources().rng_state, seed);
    let pos = world.get::<Position>(enemies[0]).unwrap();
    assert!(on_edge(&bounds(), pos));
    assert!(bounds().contains(pos.as_vec2()));
    assert_eq!(world.get::<Health>(enemies[0]), Some(&Health::full(1)));

    let world = spawner.run(0.1, world).world;
    assert_eq!(world.tag_ids(TagKind::Enemy).len(), 1);
    assert!((world.resources().spawn_timer - 0.95).abs() < 1e-6);
}

#[test]
fn test_spawned_health_ramps_with_elapsed_time() {
    let world = empty_world().with_resources(|r| r.elapsed = 24.5);
    let world = Spawner::new(cfg(), bounds()).run(DT, world).world;
    let enemy = world.tag_ids(TagKind::Enemy)[0];
    assert_eq!(world.get::<Health>(enemy), Some(&Health::full(3)));
}

#[test]
fn test_spawner_uses_all_four_edges() {
    let b = bounds();
    let mut seen = [false; 4];
    for seed in 0..200u64 {
        let world = World::new(Resources::new(seed));
        let world = Spawner::new(cfg(), b).run(DT, world).world;
        let enemy = world.tag_ids(TagKind::Enemy)[0];
        let p = world.get::<Position>(enemy).unwrap();
        if p.x == b.min_x {
            seen[0] = true;
        }
        if p.x == b.max_x {
            seen[1] = true;
        }
        if p.y == b.min_y {
            seen[2] = true;
        }
        if p.y == b.max_y {
            seen[3] = true;
        }
    }
    assert_eq!(seen, [true; 4]);
}

#[test]
fn test_edge_points() {
    let b = Bounds::new(0.0, 0.0, 100.0, 50.0);
    assert_eq!(Edge::Left.point(&b, 0.5), Vec2::new(0.0, 25.0));
    assert_eq!(Edge::Right.point(&b, 0.0), Vec2::new(100.0, 0.0));
    assert_eq!(Edge::Top.point(&b, 0.25), Vec2::new(25.0, 0.0));
    assert_eq!(Edge::Bottom.point(&b, 1.0), Vec2::new(100.0, 50.0));
}

// ---- Movement ----

#[test]
fn test_movement_integrates_and_clamps() {
    let (world, player) = with_player(empty_world(), 100.0, 100.0);
    let (world, enemy) = with_enemy(world, 30.0, 300.0);
    let world = world
        .add_component(player, Velocity::new(60.0, -30.0))
        .add_component(enemy, Velocity::new(-600.0, 0.0));
    let world = Movement::new(bounds()).run(0.5, world).world;

    assert_eq!(world.get::<Position>(player), Some(&Position::new(130.0, 85.0)));
    assert_eq!(world.get::<Position>(enemy), Some(&Position::new(18.0, 300.0)));
}

proptest! {
    #[test]
    fn prop_movement_keeps_positions_in_bounds(
        x in 18.0f32..942.0,
        y in 70.0f32..622.0,
        vx in -10_000.0f32..10_000.0,
        vy in -10_000.0f32..10_000.0,
        dt in 0.0f32..1.0,
    ) {
        let b = bounds();
        let (world, id) = with_enemy(empty_world(), x, y);
        let world = world.add_component(id, Velocity::new(vx, vy));
        let world = Movement::new(b).run(dt, world).world;
        let p = world.get::<Position>(id).unwrap();
        prop_assert!(p.x >= b.min_x && p.x <= b.max_x);
        prop_assert!(p.y >= b.min_y && p.y <= b.max_y);
    }
}

// ---- Collision: bullets ----

#[test]
fn test_bullet_hits_only_one_of_two_overlapping_enemies() {
    let (world, _) = with_player(empty_world(), 800.0, 500.0);
    let (world, e1) = with_enemy(world, 200.0, 200.0);
    let (world, e2) = with_enemy(world, 205.0, 200.0);
    let (world, b) = with_bullet(world, 202.0, 200.0);

    let hits = collision::detect_bullet_hits(&world);
    assert_eq!(hits.len(), 2);

    let out = Collision::new(cfg()).run(DT, world);
    let world = out.world;
    assert_gone(&world, b);
    assert_gone(&world, e1);
    assert!(world.is_alive(e2));
    assert_eq!(world.get::<Health>(e2), Some(&Health::full(1)));
    assert_eq!(world.resources().score, 10);
}

#[test]
fn test_kill_awards_exactly_ten_points() {
    let (world, _) = with_player(empty_world(), 800.0, 500.0);
    let (world, e) = with_enemy(world, 200.0, 200.0);
    let (world, b) = with_bullet(world, 200.0, 210.0);
    let world = world.with_resources(|r| r.score = 40);

    let world = Collision::new(cfg()).run(DT, world).world;
    assert_gone(&world, e);
    assert_gone(&world, b);
    assert_eq!(world.resources().score, 50);
}

#[test]
fn test_wounded_enemy_keeps_reduced_health() {
    let (world, _) = with_player(empty_world(), 800.0, 500.0);
    let (world, e) = with_enemy(world, 200.0, 200.0);
    let world = world.add_component(e, Health::full(3));
    let (world, _) = with_bullet(world, 200.0, 200.0);

    let world = Collision::new(cfg()).run(DT, world).world;
    assert_eq!(world.get::<Health>(e), Some(&Health { hp: 2, max_hp: 3 }));
    assert_eq!(world.resources().score, 0);
    assert!(world.tag_ids(TagKind::Bullet).is_empty());
}

#[test]
fn test_resolve_counts_kills() {
    let (world, _) = with_player(empty_world(), 800.0, 500.0);
    let (world, e1) = with_enemy(world, 200.0, 200.0);
    let (world, e2) = with_enemy(world, 400.0, 200.0);
    let world = world.add_component(e2, Health::full(2));
    let (world, _) = with_bullet(world, 200.0, 200.0);
    let (world, _) = with_bullet(world, 400.0, 200.0);

    let hits = collision::detect_bullet_hits(&world);
    let (world, kills) = collision::resolve_bullet_hits(world, &hits, 1);
    assert_eq!(kills, 1);
    assert!(!world.is_alive(e1));
    assert_eq!(world.get::<Health>(e2), Some(&Health { hp: 1, max_hp: 2 }));
    assert_eq!(world.resources().score, 10);
}

#[test]
fn test_second_bullet_on_dead_enemy_is_spent() {
    let (world, _) = with_player(empty_world(), 800.0, 500.0);
    let (world, e) = with_enemy(world, 200.0, 200.0);
    let (world, b1) = with_bullet(world, 200.0, 200.0);
    let (world, b2) = with_bullet(world, 201.0, 200.0);

    let world = Collision::new(cfg()).run(DT, world).world;
    assert_gone(&world, e);
    assert_gone(&world, b1);
    assert_gone(&world, b2);
    assert_eq!(world.resources().score, 10);
}

#[test]
fn test_two_bullets_two_enemies_resolve_in_id_order() {
    let (world, _) = with_player(empty_world(), 800.0, 500.0);
    let (world, e1) = with_enemy(world, 200.0, 200.0);
    let (world, e2) = with_enemy(world, 210.0, 200.0);
    let world = world
        .add_component(e1, Health::full(2))
        .add_component(e2, Health::full(2));
    let (world, _) = with_bullet(world, 205.0, 200.0);
    let (world, _) = with_bullet(world, 205.0, 200.0);

    let world = Collision::new(cfg()).run(DT, world).world;
    // Both bullets pick e1 first, so e1 dies and e2 is never touched.
    assert!(!world.is_alive(e1));
    assert_eq!(world.get::<Health>(e2), Some(&Health::full(2)));
}

#[test]
fn test_missing_bullet_collider_uses_fallback() {
    let (world, _) = with_player(empty_world(), 800.0, 500.0);
    let (world, e) = with_enemy(world, 200.0, 200.0);
    let (world, b) = world.add_entity();
    let world = world
        .add_component(b, Tag::new(TagKind::Bullet))
        .add_component(b, Position::new(218.0, 200.0));

    // 14 + 4 reaches exactly 18 units.
    let hits = collision::detect_bullet_hits(&world);
    assert_eq!(hits, vec![collision::Hit { bullet: b, enemy: e }]);
}

// ---- Collision: player contact ----

#[test]
fn test_player_damage_stacks_per_contact() {
    let (world, player) = with_player(empty_world(), 300.0, 300.0);
    let (world, e1) = with_enemy(world, 300.0, 300.0);
    let (world, e2) = with_enemy(world, 310.0, 300.0);
    let (world, e3) = with_enemy(world, 300.0, 310.0);
    let (world, far) = with_enemy(world, 800.0, 500.0);

    let out = Collision::new(cfg()).run(DT, world);
    let world = out.world;
    assert_eq!(hp(&world, player), 2);
    for e in [e1, e2, e3] {
        assert_gone(&world, e);
    }
    assert!(world.is_alive(far));
    assert!(!world.resources().game_over);
    assert!(out.effects.is_empty());
}

#[test]
fn test_contact_damage_clamps_at_zero_and_ends_game() {
    let (world, player) = with_player(empty_world(), 300.0, 300.0);
    let world = world
        .add_component(player, Health { hp: 2, max_hp: 5 })
        .with_resources(|r| r.score = 70);
    let (world, _) = with_enemy(world, 300.0, 300.0);
    let (world, _) = with_enemy(world, 305.0, 300.0);
    let (world, _) = with_enemy(world, 295.0, 300.0);

    let out = Collision::new(cfg()).run(DT, world);
    assert_eq!(hp(&out.world, player), 0);
    assert!(out.world.resources().game_over);
    assert!(out.world.tag_ids(TagKind::Enemy).is_empty());
    assert_eq!(out.effects, vec![Effect::GameOver { score: 70 }]);
}

#[test]
fn test_enemy_killed_by_bullet_cannot_touch_player() {
    let (world, player) = with_player(empty_world(), 300.0, 300.0);
    let (world, e) = with_enemy(world, 320.0, 300.0);
    let (world, _) = with_bullet(world, 325.0, 300.0);

    let world = Collision::new(cfg()).run(DT, world).world;
    assert_gone(&world, e);
    assert_eq!(hp(&world, player), 5);
    assert_eq!(world.resources().score, 10);
}

#[test]
fn test_per_touch_damage_is_configurable() {
    let config = GameConfig {
        player_damage_per_touch: 2,
        ..cfg()
    };
    let (world, player) = with_player(empty_world(), 300.0, 300.0);
    let (world, _) = with_enemy(world, 300.0, 300.0);
    let world = Collision::new(config).run(DT, world).world;
    assert_eq!(hp(&world, player), 3);
}

#[test]
fn test_collision_without_player_is_noop() {
    let (world, _) = with_enemy(empty_world(), 200.0, 200.0);
    let (world, _) = with_bullet(world, 200.0, 200.0);
    let out = Collision::new(cfg()).run(DT, world.clone());
    assert_eq!(out.world, world);
}

#[test]
fn test_homing_enemy_hits_player_once() {
    let (world, player) = with_player(empty_world(), 100.0, 100.0);
    let (world, enemy) = with_enemy(world, 18.0, 100.0);
    let mut pipeline = Pipeline::new()
        .with(EnemyAi::new(cfg()))
        .with(Movement::new(bounds()))
        .with(Collision::new(cfg()));

    let mut world = world;
    let mut contact_tick = None;
    for tick in 0..120 {
        world = pipeline.run(DT, world).world;
        if contact_tick.is_none() && !world.is_alive(enemy) {
            contact_tick = Some(tick);
        }
    }
    let contact_tick = contact_tick.expect("enemy never reached the player");
    // 54 units to close at 120 u/s is about 27 ticks.
    assert!((20..35).contains(&contact_tick), "contact at tick {contact_tick}");
    assert_eq!(hp(&world, player), 4);
    assert_gone(&world, enemy);
}

// ---- Lifetime ----

#[test]
fn test_lifetime_counts_down_then_removes() {
    let (world, b) = with_bullet(empty_world(), 200.0, 200.0);
    let mut expiry = LifetimeExpiry;

    let world = expiry.run(0.5, world).world;
    let left = world.get::<Lifetime>(b).unwrap().remaining;
    assert!((left - 0.45).abs() < 1e-6);

    let world = expiry.run(0.5, world).world;
    assert_gone(&world, b);
}

// ---- Engine ----

#[test]
fn test_step_requires_start() {
    let mut engine = Engine::from_settings(&Settings::default(), Box::new(NoInput));
    let mut log = EffectLog::default();
    assert!(engine.step(1.0, &mut log).is_none());
    assert!(engine.world().is_none());
    assert_eq!(engine.stop(), Err(EngineError::NotRunning));
}

#[test]
fn test_start_twice_fails() {
    let settings = Settings::default();
    let mut engine = Engine::from_settings(&settings, Box::new(NoInput));
    assert!(!engine.is_running());
    engine.start(Engine::initial_world(&settings), 0.0).unwrap();
    assert!(engine.is_running());
    assert_eq!(engine.pipeline().len(), 11);
    assert_eq!(
        engine.start(Engine::initial_world(&settings), 0.0),
        Err(EngineError::AlreadyRunning)
    );
}

#[test]
fn test_step_measures_and_caps_dt() {
    let settings = Settings::default();
    let mut engine = Engine::from_settings(&settings, Box::new(NoInput));
    engine.start(Engine::initial_world(&settings), 10.0).unwrap();
    let mut log = EffectLog::default();

    let report = engine.step(10.02, &mut log).unwrap();
    assert!((report.dt - 0.02).abs() < 1e-4);
    assert_eq!(report.tick, 1);

    let report = engine.step(13.0, &mut log).unwrap();
    assert_eq!(report.dt, 0.25);

    let report = engine.step(12.0, &mut log).unwrap();
    assert_eq!(report.dt, 0.0);
    assert_eq!(engine.tick_count(), 3);
}

#[test]
fn test_stop_freezes_engine_but_keeps_world() {
    let settings = Settings::default();
    let mut engine = Engine::from_settings(&settings, Box::new(NoInput));
    engine.start(Engine::initial_world(&settings), 0.0).unwrap();
    let mut log = EffectLog::default();
    engine.step(0.016, &mut log).unwrap();
    engine.stop().unwrap();

    let before = engine.world().cloned();
    assert!(engine.step(0.032, &mut log).is_none());
    assert!(engine.advance(DT, &mut log).is_none());
    assert_eq!(engine.world().cloned(), before);
    assert!(before.is_some());
}

#[test]
fn test_render_effect_carries_final_world() {
    let settings = Settings::default();
    let mut engine = Engine::from_settings(&settings, Box::new(NoInput));
    engine.start(Engine::initial_world(&settings), 0.0).unwrap();
    let mut log = EffectLog::default();
    let report = engine.advance(DT, &mut log).unwrap();

    assert_eq!(report.effects, 1);
    match log.0.last() {
        Some(Effect::Render { world }) => assert_eq!(Some(world), engine.world()),
        other => panic!("expected a render effect, got {other:?}"),
    }
}

#[test]
fn test_game_over_effect_precedes_render() {
    let (world, player) = with_player(empty_world(), 480.0, 346.0);
    let world = world.add_component(player, Health { hp: 1, max_hp: 5 });
    let (world, _) = with_enemy(world, 480.0, 346.0);
    let (mut engine, _tx) = engine_with(world);
    let mut log = EffectLog::default();
    engine.advance(DT, &mut log).unwrap();

    let names: Vec<&str> = log.0.iter().map(Effect::name).collect();
    assert_eq!(names, vec!["game_over", "render"]);
}

#[test]
fn test_input_is_drained_once_per_tick() {
    let (world, player) = with_player(empty_world(), 480.0, 346.0);
    let (mut engine, tx) = engine_with(world);
    let mut log = EffectLog::default();

    tx.send(InputEvent::KeyDown { key: Key::KeyD }).unwrap();
    engine.advance(DT, &mut log).unwrap();
    let x1 = engine.world().unwrap().get::<Position>(player).unwrap().x;
    assert!(x1 > 480.0);

    // Still held on the next tick with no new events.
    engine.advance(DT, &mut log).unwrap();
    let x2 = engine.world().unwrap().get::<Position>(player).unwrap().x;
    assert!(x2 > x1);

    tx.send(InputEvent::KeyUp { key: Key::KeyD }).unwrap();
    engine.advance(DT, &mut log).unwrap();
    let x3 = engine.world().unwrap().get::<Position>(player).unwrap().x;
    assert_eq!(x3, x2);
}

// ---- Determinism ----

fn run_frames(seed: u64, ticks: usize) -> Vec<String> {
    let mut settings = Settings::default();
    settings.game.seed = seed;
    let mut engine = Engine::new(
        standard_pipeline(&settings, Box::new(NoInput)),
        DriverConfig::default(),
    );
    engine.start(Engine::initial_world(&settings), 0.0).unwrap();

    let mut frames = Vec::new();
    for _ in 0..ticks {
        let mut log = EffectLog::default();
        engine.advance(DT, &mut log).unwrap();
        for effect in &log.0 {
            if let Effect::Render { world } = effect {
                frames.push(serde_json::to_string(&FrameView::from_world(world)).unwrap());
            }
        }
    }
    frames
}

#[test]
fn test_determinism_same_seed() {
    let a = run_frames(12345, 600);
    let b = run_frames(12345, 600);
    assert_eq!(a.len(), 600);
    assert_eq!(a, b, "frames diverged with same seed");
}

#[test]
fn test_determinism_different_seeds() {
    let a = run_frames(111, 5);
    let b = run_frames(222, 5);
    assert_ne!(a, b, "different seeds should spawn differently");
}

#[test]
fn test_idle_player_eventually_dies() {
    let settings = Settings::default();
    let mut engine = Engine::from_settings(&settings, Box::new(NoInput));
    engine.start(Engine::initial_world(&settings), 0.0).unwrap();
    let mut log = EffectLog::default();
    for _ in 0..(60 * 60) {
        engine.advance(DT, &mut log).unwrap();
        if engine.world().unwrap().resources().game_over {
            break;
        }
    }
    let world = engine.world().unwrap();
    assert!(world.resources().game_over);
    let player = world.first_entity_with_tag(TagKind::Player).unwrap();
    assert_eq!(hp(world, player), 0);
    assert_eq!(
        log.0.iter().filter(|e| matches!(e, Effect::GameOver { .. })).count(),
        1
    );
}
