//! Core types and definitions for the HORDE arena simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, resources, configuration, input records, the immutable
//! world snapshot, effects and the frame view handed to renderers.
//! It has no dependency on threads, clocks or any runtime framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod entity;
pub mod enums;
pub mod events;
pub mod input;
pub mod resources;
pub mod state;
pub mod types;
pub mod world;

pub use entity::EntityId;
pub use world::World;
