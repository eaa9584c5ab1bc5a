//! HORDE headless application.
//!
//! Runs the simulation on its own thread and exposes it through a small
//! control surface: start, forward input, read the latest frame, shut down.

pub mod control;
pub mod demo;
pub mod game_loop;
pub mod state;

pub use horde_core as core;
