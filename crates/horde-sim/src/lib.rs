//! Simulation engine for HORDE.
//!
//! Threads an immutable world snapshot through a fixed pipeline of systems
//! once per frame and hands the emitted effects to the caller. Headless and
//! deterministic for a given seed and input script.

pub mod engine;
pub mod input;
pub mod pipeline;
pub mod systems;
pub mod world_setup;

pub use horde_core as core;
pub use engine::{EffectHandler, EffectLog, Engine, EngineError, TickReport};
pub use input::{ChannelInput, InputSource, NoInput};
pub use pipeline::{Pipeline, StageOutput, System};

#[cfg(test)]
mod tests;
