//! Gameplay systems, one stage per file.
//!
//! Every stage except input, restart, reset and render is a pass-through
//! while `game_over` is set, which freezes the simulation until a restart.

pub mod collision;
pub mod enemy_ai;
pub mod input;
pub mod lifetime;
pub mod movement;
pub mod player_control;
pub mod render;
pub mod reset;
pub mod restart;
pub mod spawner;
pub mod time;
