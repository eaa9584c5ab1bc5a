//! Input records crossing the boundary between the platform and the simulation.
//!
//! Raw events are folded into an [`InputBuffer`] between ticks. Once per tick
//! the buffer is drained into an [`InputFrame`], which the first pipeline stage
//! merges into the persistent [`InputState`] resource.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::Key;

/// A single raw event from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    KeyDown { key: Key },
    KeyUp { key: Key },
    /// Pointer moved, in arena coordinates.
    PointerMoved { x: f32, y: f32 },
    PointerDown,
    PointerUp,
}

/// Pointer state as seen by a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
    /// A press arrived since the previous drain.
    pub clicked: bool,
}

/// Everything that happened between two drains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub keys_pressed: BTreeSet<Key>,
    pub keys_released: BTreeSet<Key>,
    pub pointer: PointerState,
}

/// One-shot accumulator for raw events.
///
/// `drain` hands out the accumulated frame and resets the key sets and the
/// click edge. Pointer position and the `down` level carry over.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    keys_pressed: BTreeSet<Key>,
    keys_released: BTreeSet<Key>,
    pointer: PointerState,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key } => {
                self.keys_pressed.insert(key);
            }
            InputEvent::KeyUp { key } => {
                self.keys_released.insert(key);
            }
            InputEvent::PointerMoved { x, y } => {
                self.pointer.x = x;
                self.pointer.y = y;
            }
            InputEvent::PointerDown => {
                self.pointer.down = true;
                self.pointer.clicked = true;
            }
            InputEvent::PointerUp => {
                self.pointer.down = false;
            }
        }
    }

    pub fn drain(&mut self) -> InputFrame {
        let frame = InputFrame {
            keys_pressed: std::mem::take(&mut self.keys_pressed),
            keys_released: std::mem::take(&mut self.keys_released),
            pointer: self.pointer,
        };
        self.pointer.clicked = false;
        frame
    }
}

/// Persistent input resource: keys currently held plus the latest pointer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub held: BTreeSet<Key>,
    pub pointer: PointerState,
}

impl InputState {
    /// Apply a drained frame: presses first, then releases.
    /// A key pressed and released within one frame ends up not held.
    pub fn merge(&self, frame: &InputFrame) -> InputState {
        let mut held = self.held.clone();
        held.extend(frame.keys_pressed.iter().copied());
        for key in &frame.keys_released {
            held.remove(key);
        }
        InputState {
            held,
            pointer: frame.pointer,
        }
    }

    /// True if any held key satisfies `pred`.
    pub fn any(&self, pred: impl Fn(Key) -> bool) -> bool {
        self.held.iter().any(|&k| pred(k))
    }

    pub fn wants_fire(&self) -> bool {
        self.any(Key::is_fire) || self.pointer.clicked
    }

    pub fn wants_restart(&self) -> bool {
        self.any(Key::is_restart) || self.pointer.clicked
    }
}
