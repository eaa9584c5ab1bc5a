//! Scripted input for the headless demo: strafe side to side while firing.

use std::time::Duration;

use horde_core::input::InputEvent;
use horde_core::types::Bounds;

/// What a script step feeds the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptInput {
    /// A DOM key code, pressed or released.
    Key { code: &'static str, pressed: bool },
    Event(InputEvent),
}

/// One scripted input, sent `at` after the demo starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub at: Duration,
    pub input: ScriptInput,
}

fn key(ms: u64, code: &'static str, pressed: bool) -> ScriptStep {
    ScriptStep {
        at: Duration::from_millis(ms),
        input: ScriptInput::Key { code, pressed },
    }
}

/// Steps in time order, aiming at the arena's upper edge.
pub fn demo_script(bounds: &Bounds, length: Duration) -> Vec<ScriptStep> {
    let aim = bounds.center();
    let mut steps = vec![
        ScriptStep {
            at: Duration::ZERO,
            input: ScriptInput::Event(InputEvent::PointerMoved {
                x: aim.x,
                y: bounds.min_y,
            }),
        },
        key(0, "Space", true),
    ];

    let leg = 1_500;
    let total = length.as_millis() as u64;
    let mut t = 0;
    let mut right = true;
    while t + leg <= total {
        let (press, release) = if right {
            ("KeyD", "KeyA")
        } else {
            ("KeyA", "KeyD")
        };
        steps.push(key(t, release, false));
        steps.push(key(t, press, true));
        t += leg;
        right = !right;
    }

    steps.push(key(total, "KeyA", false));
    steps.push(key(total, "KeyD", false));
    steps.push(key(total, "Space", false));
    steps
}
