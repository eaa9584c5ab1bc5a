//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Role of an entity, stored in its [`Tag`](crate::components::Tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    Player,
    Enemy,
    Bullet,
}

/// The fixed set of component tables in a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Position,
    Velocity,
    Sprite,
    Collider,
    Health,
    Lifetime,
    Tag,
}

impl ComponentKind {
    /// Every component kind, in table order.
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::Position,
        ComponentKind::Velocity,
        ComponentKind::Sprite,
        ComponentKind::Collider,
        ComponentKind::Health,
        ComponentKind::Lifetime,
        ComponentKind::Tag,
    ];
}

/// Keys the game reacts to. Everything else is dropped at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    KeyA,
    KeyD,
    KeyW,
    KeyS,
    Space,
    KeyR,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.code` string.
    pub fn from_code(code: &str) -> Option<Key> {
        let key = match code {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "KeyA" => Key::KeyA,
            "KeyD" => Key::KeyD,
            "KeyW" => Key::KeyW,
            "KeyS" => Key::KeyS,
            "Space" => Key::Space,
            "KeyR" => Key::KeyR,
            _ => return None,
        };
        Some(key)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Key::ArrowLeft | Key::KeyA)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Key::ArrowRight | Key::KeyD)
    }

    pub fn is_up(self) -> bool {
        matches!(self, Key::ArrowUp | Key::KeyW)
    }

    pub fn is_down(self) -> bool {
        matches!(self, Key::ArrowDown | Key::KeyS)
    }

    pub fn is_fire(self) -> bool {
        self == Key::Space
    }

    pub fn is_restart(self) -> bool {
        self == Key::KeyR
    }
}
