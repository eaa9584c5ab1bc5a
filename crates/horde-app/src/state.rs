//! Application state shared between the control surface and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use horde_core::input::InputEvent;
use horde_core::state::FrameView;

/// Commands sent from the control surface to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A raw input event to feed the engine's input collaborator.
    Input(InputEvent),
    /// Stop the engine and end the thread.
    Shutdown,
}

/// Latest frame, written by the game loop after every render.
pub type SharedFrame = Arc<Mutex<Option<FrameView>>>;

/// Shared application state.
///
/// - `mpsc::Sender` is Send but not Sync, so it sits behind a `Mutex`
/// - `Option` covers the time before `start_game`
#[derive(Default)]
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_frame: SharedFrame,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_frame.lock().unwrap().is_none());
        assert!(state.loop_handle.lock().unwrap().is_none());
    }
}
