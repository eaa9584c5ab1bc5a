//! Frame view: the drawable state handed to the render collaborator.

use serde::{Deserialize, Serialize};

use crate::components::{Health, Position, Sprite, Tag};
use crate::entity::EntityId;
use crate::enums::TagKind;
use crate::world::World;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub score: u32,
    /// 0 when there is no player.
    pub player_hp: i32,
    pub game_over: bool,
    pub sprites: Vec<SpriteView>,
    pub health_bars: Vec<HealthBar>,
}

/// One box to draw, centred on `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub id: EntityId,
    pub kind: Option<TagKind>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
}

/// Enemy health bar above the sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthBar {
    pub id: EntityId,
    /// Remaining fraction, 0..=1.
    pub ratio: f32,
}

impl FrameView {
    pub fn from_world(world: &World) -> Self {
        let resources = world.resources();

        let player_hp = world
            .first_entity_with_tag(TagKind::Player)
            .and_then(|pid| world.get::<Health>(pid))
            .map_or(0, |h| h.hp);

        let sprites = world
            .entities()
            .filter_map(|id| {
                let pos = world.get::<Position>(id)?;
                let sprite = world.get::<Sprite>(id)?;
                Some(SpriteView {
                    id,
                    kind: world.get::<Tag>(id).map(|t| t.kind),
                    x: pos.x,
                    y: pos.y,
                    width: sprite.width,
                    height: sprite.height,
                    color: sprite.color,
                })
            })
            .collect();

        let health_bars = world
            .tag_ids(TagKind::Enemy)
            .into_iter()
            .filter(|&id| world.get::<Position>(id).is_some() && world.get::<Sprite>(id).is_some())
            .filter_map(|id| {
                world.get::<Health>(id).map(|h| HealthBar {
                    id,
                    ratio: h.ratio(),
                })
            })
            .collect();

        Self {
            score: resources.score,
            player_hp,
            game_over: resources.game_over,
            sprites,
            health_bars,
        }
    }
}
