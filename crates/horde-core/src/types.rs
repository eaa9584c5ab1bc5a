//! Fundamental geometric types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned arena rectangle. Every Position is kept inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for Bounds {
    /// 960x640 arena, 18-unit margin, 70-unit HUD strip at the top.
    fn default() -> Self {
        Self::with_margins(960.0, 640.0)
    }
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds for a surface of the given size, leaving room for the HUD.
    pub fn with_margins(width: f32, height: f32) -> Self {
        Self::new(18.0, 70.0, width - 18.0, height - 18.0)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Clamp each axis independently into the rectangle.
    /// Never panics, even on inverted bounds (the max edge wins).
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.max(self.min_x).min(self.max_x),
            p.y.max(self.min_y).min(self.max_y),
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}
