//! Effects emitted by pipeline stages and dispatched by the driver
//! once the whole pipeline has run.

use crate::world::World;

/// A side effect requested by a stage, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Draw this snapshot. Always the final state of its tick.
    Render { world: World },
    /// The player just died this tick.
    GameOver { score: u32 },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Render { .. } => "render",
            Effect::GameOver { .. } => "game_over",
        }
    }
}
