//! Tick driver: owns the current snapshot and runs the pipeline once per frame.
//!
//! All driver state (running flag, last frame time, current world) lives in
//! [`Engine`]; the caller owns it and decides when to call [`Engine::step`],
//! typically once per display refresh. A tick always runs to completion, and
//! `stop` only takes effect before the next one.

use horde_core::config::{DriverConfig, Settings};
use horde_core::events::Effect;
use horde_core::world::World;

use crate::input::InputSource;
use crate::pipeline::{standard_pipeline, Pipeline};
use crate::world_setup;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("engine is already running")]
    AlreadyRunning,
    #[error("engine is not running")]
    NotRunning,
}

/// Receives the effects of each tick, in emission order, after the whole
/// pipeline has run.
pub trait EffectHandler {
    fn handle(&mut self, effect: &Effect);
}

impl<F: FnMut(&Effect)> EffectHandler for F {
    fn handle(&mut self, effect: &Effect) {
        self(effect)
    }
}

/// Handler that keeps every effect it sees.
#[derive(Debug, Default)]
pub struct EffectLog(pub Vec<Effect>);

impl EffectHandler for EffectLog {
    fn handle(&mut self, effect: &Effect) {
        self.0.push(effect.clone());
    }
}

/// Summary of one completed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// 1-based index of the tick since the engine was created.
    pub tick: u64,
    pub dt: f32,
    pub effects: usize,
    pub entities: usize,
}

pub struct Engine {
    pipeline: Pipeline,
    config: DriverConfig,
    world: Option<World>,
    running: bool,
    last_time: f64,
    tick: u64,
}

impl Engine {
    pub fn new(pipeline: Pipeline, config: DriverConfig) -> Self {
        Self {
            pipeline,
            config,
            world: None,
            running: false,
            last_time: 0.0,
            tick: 0,
        }
    }

    /// Engine with the standard pipeline for these settings.
    pub fn from_settings(settings: &Settings, input: Box<dyn InputSource>) -> Self {
        Self::new(standard_pipeline(settings, input), settings.driver.clone())
    }

    /// The world a game starts from under these settings.
    pub fn initial_world(settings: &Settings) -> World {
        world_setup::initial_world(&settings.bounds, settings.game.seed)
    }

    /// Begin running from `initial`. `now` is the clock reading, in seconds,
    /// that the first `step` measures its `dt` against.
    pub fn start(&mut self, initial: World, now: f64) -> Result<(), EngineError> {
        if self.running {
            return Err(EngineError::AlreadyRunning);
        }
        log::info!(
            "engine started: {} stages, {} entities",
            self.pipeline.len(),
            initial.entity_count()
        );
        self.world = Some(initial);
        self.last_time = now;
        self.running = true;
        Ok(())
    }

    /// Stop before the next tick. The last world stays readable.
    pub fn stop(&mut self) -> Result<(), EngineError> {
        if !self.running {
            return Err(EngineError::NotRunning);
        }
        self.running = false;
        log::info!("engine stopped after {} ticks", self.tick);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Run one tick for a frame observed at `now` (seconds).
    ///
    /// `dt` is the time since the previous frame, capped at `max_frame_dt`.
    /// Returns `None` without doing anything while stopped.
    pub fn step(&mut self, now: f64, handler: &mut impl EffectHandler) -> Option<TickReport> {
        if !self.running {
            return None;
        }
        let dt = ((now - self.last_time) as f32)
            .max(0.0)
            .min(self.config.max_frame_dt);
        self.last_time = now;
        self.advance(dt, handler)
    }

    /// Run exactly one tick with an explicit `dt`.
    pub fn advance(&mut self, dt: f32, handler: &mut impl EffectHandler) -> Option<TickReport> {
        if !self.running {
            return None;
        }
        let world = self.world.take()?;

        let out = self.pipeline.run(dt, world);
        for effect in &out.effects {
            log::trace!("dispatch {}", effect.name());
            handler.handle(effect);
        }

        self.tick += 1;
        let report = TickReport {
            tick: self.tick,
            dt,
            effects: out.effects.len(),
            entities: out.world.entity_count(),
        };
        log::trace!(
            "tick {} dt={:.4} entities={} effects={}",
            report.tick,
            dt,
            report.entities,
            report.effects
        );
        self.world = Some(out.world);
        Some(report)
    }
}
