//! Runtime configuration: arena bounds, gameplay tunables, driver settings.
//!
//! Loaded once at startup from JSON. Every field has a default, so a partial
//! file (or none at all) is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SEED, FRAME_RATE, MAX_FRAME_DT};
use crate::types::Bounds;

/// Errors raised while loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tunables. Speeds are units per second, times are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub spawn_every: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub shoot_cooldown: f32,
    pub player_damage_per_touch: i32,
    pub enemy_base_hp: i32,
    /// Seconds of play between enemy health increases.
    pub enemy_hp_ramp_every: f32,
    pub enemy_hp_ramp_amount: i32,
    pub bullet_damage: i32,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: 260.0,
            enemy_speed: 120.0,
            spawn_every: 1.05,
            bullet_speed: 520.0,
            bullet_lifetime: 0.95,
            shoot_cooldown: 0.18,
            player_damage_per_touch: 1,
            enemy_base_hp: 1,
            enemy_hp_ramp_every: 12.0,
            enemy_hp_ramp_amount: 1,
            bullet_damage: 1,
            seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    /// Health of an enemy spawned after `elapsed` seconds of play.
    pub fn enemy_hp_at(&self, elapsed: f32) -> i32 {
        if self.enemy_hp_ramp_every <= 0.0 || !elapsed.is_finite() {
            return self.enemy_base_hp;
        }
        let steps = (elapsed.max(0.0) / self.enemy_hp_ramp_every).floor() as i32;
        self.enemy_base_hp
            .saturating_add(steps.saturating_mul(self.enemy_hp_ramp_amount))
    }
}

/// Settings for the tick driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Frames per second requested from the frame clock.
    pub frame_rate: u32,
    /// Upper bound on a single tick's `dt`.
    pub max_frame_dt: f32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// Everything the simulation is constructed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bounds: Bounds,
    pub game: GameConfig,
    pub driver: DriverConfig,
}

impl Settings {
    /// Read and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.bounds;
        for (field, v) in [
            ("bounds.min_x", b.min_x),
            ("bounds.min_y", b.min_y),
            ("bounds.max_x", b.max_x),
            ("bounds.max_y", b.max_y),
        ] {
            finite(field, v)?;
        }
        if b.min_x >= b.max_x {
            return Err(invalid("bounds.max_x", "must be greater than min_x"));
        }
        if b.min_y >= b.max_y {
            return Err(invalid("bounds.max_y", "must be greater than min_y"));
        }

        let g = &self.game;
        for (field, v) in [
            ("game.player_speed", g.player_speed),
            ("game.enemy_speed", g.enemy_speed),
            ("game.bullet_speed", g.bullet_speed),
            ("game.bullet_lifetime", g.bullet_lifetime),
            ("game.shoot_cooldown", g.shoot_cooldown),
        ] {
            non_negative(field, v)?;
        }
        positive("game.spawn_every", g.spawn_every)?;
        positive("game.enemy_hp_ramp_every", g.enemy_hp_ramp_every)?;
        if g.enemy_base_hp < 1 {
            return Err(invalid("game.enemy_base_hp", "must be at least 1"));
        }
        for (field, v) in [
            ("game.player_damage_per_touch", g.player_damage_per_touch),
            ("game.enemy_hp_ramp_amount", g.enemy_hp_ramp_amount),
            ("game.bullet_damage", g.bullet_damage),
        ] {
            if v < 0 {
                return Err(invalid(field, "must not be negative"));
            }
        }

        let d = &self.driver;
        if d.frame_rate == 0 {
            return Err(invalid("driver.frame_rate", "must be at least 1"));
        }
        positive("driver.max_frame_dt", d.max_frame_dt)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn finite(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
    finite(field, v)?;
    if v < 0.0 {
        return Err(invalid(field, "must not be negative"));
    }
    Ok(())
}

fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
    finite(field, v)?;
    if v <= 0.0 {
        return Err(invalid(field, "must be positive"));
    }
    Ok(())
}
