//! Stage trait and the ordered pipeline that runs once per tick.
//!
//! A system is built from its configuration up front, then run with
//! `(dt, world)` every tick and returns the next world plus any effects.

use horde_core::config::Settings;
use horde_core::events::Effect;
use horde_core::world::World;

use crate::input::InputSource;
use crate::systems;

/// Result of one stage (or of a whole pipeline run).
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub world: World,
    pub effects: Vec<Effect>,
}

impl StageOutput {
    /// The world unchanged, no effects.
    pub fn pass(world: World) -> Self {
        Self {
            world,
            effects: Vec::new(),
        }
    }

    pub fn with_effects(world: World, effects: Vec<Effect>) -> Self {
        Self { world, effects }
    }
}

/// One transformation stage.
///
/// Systems never mutate a world they were handed by anyone else: the world
/// is taken by value and tables are copied on write, so a caller that kept a
/// clone still sees the old state.
pub trait System {
    fn name(&self) -> &'static str;

    fn run(&mut self, dt: f32, world: World) -> StageOutput;
}

/// Systems in the order they run each tick.
#[derive(Default)]
pub struct Pipeline {
    systems: Vec<Box<dyn System>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn with(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Thread `world` through every stage, collecting effects in stage order.
    pub fn run(&mut self, dt: f32, world: World) -> StageOutput {
        let mut effects = Vec::new();
        let mut world = world;
        for system in &mut self.systems {
            let out = system.run(dt, world);
            world = out.world;
            effects.extend(out.effects);
        }
        StageOutput { world, effects }
    }
}

/// The game's fixed stage order.
///
/// Reset must run before anything reads the world, and physics before
/// collision so overlaps are tested against this tick's positions.
pub fn standard_pipeline(settings: &Settings, input: Box<dyn InputSource>) -> Pipeline {
    let bounds = settings.bounds;
    let game = settings.game.clone();
    Pipeline::new()
        .with(systems::input::ApplyInput::new(input))
        .with(systems::restart::RestartDetect)
        .with(systems::reset::ApplyReset::new(bounds))
        .with(systems::time::AdvanceTime)
        .with(systems::player_control::PlayerControl::new(game.clone()))
        .with(systems::enemy_ai::EnemyAi::new(game.clone()))
        .with(systems::spawner::Spawner::new(game.clone(), bounds))
        .with(systems::movement::Movement::new(bounds))
        .with(systems::collision::Collision::new(game))
        .with(systems::lifetime::LifetimeExpiry)
        .with(systems::render::RenderRequest)
}
