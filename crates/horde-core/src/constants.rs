//! Prefab and scoring constants.
//!
//! Tunables that players or designers are expected to change live in
//! [`crate::config::GameConfig`]; these are the fixed shapes of the game.

// --- Player ---

/// Player sprite edge length.
pub const PLAYER_SPRITE_SIZE: f32 = 26.0;

/// Player sprite colour (`#7cf29a`).
pub const PLAYER_COLOR: u32 = 0x7cf29a;

/// Player collision radius.
pub const PLAYER_RADIUS: f32 = 14.0;

/// Player starting (and maximum) health.
pub const PLAYER_MAX_HP: i32 = 5;

// --- Enemy ---

/// Enemy sprite edge length.
pub const ENEMY_SPRITE_SIZE: f32 = 24.0;

/// Enemy sprite colour (`#ff6b6b`).
pub const ENEMY_COLOR: u32 = 0xff6b6b;

/// Enemy collision radius.
pub const ENEMY_RADIUS: f32 = 14.0;

// --- Bullet ---

/// Bullet sprite edge length.
pub const BULLET_SPRITE_SIZE: f32 = 8.0;

/// Bullet sprite colour (`#ffd166`).
pub const BULLET_COLOR: u32 = 0xffd166;

/// Bullet collision radius.
pub const BULLET_RADIUS: f32 = 5.0;

// --- Collision fallbacks ---
// Used when an entity lost or never had a Collider.

pub const FALLBACK_PLAYER_RADIUS: f32 = 14.0;
pub const FALLBACK_ENEMY_RADIUS: f32 = 14.0;
pub const FALLBACK_BULLET_RADIUS: f32 = 4.0;

// --- Scoring ---

/// Points awarded for each enemy killed by a bullet.
pub const KILL_SCORE: u32 = 10;

// --- Driver ---

/// Default frame rate of the display-refresh stand-in (Hz).
pub const FRAME_RATE: u32 = 60;

/// Largest `dt` a single tick will ever see (seconds).
/// Frames delivered after a long stall are folded into one capped step.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Default RNG seed. Same seed + same input = same game.
pub const DEFAULT_SEED: u64 = 42;
