//! Control surface over the game loop thread.
//!
//! These functions bridge callers (the CLI today) to the game loop thread via
//! the channel stored in [`AppState`].

use horde_core::config::Settings;
use horde_core::enums::Key;
use horde_core::input::InputEvent;
use horde_core::state::FrameView;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("game already running")]
    AlreadyRunning,
    #[error("game not started")]
    NotStarted,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Start the game. Spawns the game loop thread if not already running.
pub fn start_game(state: &AppState, settings: Settings) -> Result<(), ControlError> {
    let mut tx_lock = state.command_tx.lock().map_err(|_| ControlError::Poisoned)?;
    if tx_lock.is_some() {
        return Err(ControlError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(settings, state.latest_frame.clone())?;
    *tx_lock = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| ControlError::Poisoned)? = Some(handle);
    log::info!("game loop started");
    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), ControlError> {
    let tx_lock = state.command_tx.lock().map_err(|_| ControlError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| ControlError::Disconnected),
        None => Err(ControlError::NotStarted),
    }
}

/// Forward one input event. It takes effect at the next tick.
pub fn send_input(state: &AppState, event: InputEvent) -> Result<(), ControlError> {
    send(state, GameLoopCommand::Input(event))
}

/// Forward a key press or release given as a DOM key code.
///
/// Returns `Ok(false)` when the code is not bound to anything; such keys are
/// ignored.
pub fn send_key(state: &AppState, code: &str, pressed: bool) -> Result<bool, ControlError> {
    let key = match Key::from_code(code) {
        Some(key) => key,
        None => {
            log::debug!("ignoring unbound key code {code:?}");
            return Ok(false);
        }
    };
    let event = if pressed {
        InputEvent::KeyDown { key }
    } else {
        InputEvent::KeyUp { key }
    };
    send_input(state, event)?;
    Ok(true)
}

/// The most recently rendered frame, if any.
pub fn latest_frame(state: &AppState) -> Result<Option<FrameView>, ControlError> {
    let lock = state.latest_frame.lock().map_err(|_| ControlError::Poisoned)?;
    Ok(lock.clone())
}

/// Ask the loop to stop and wait for the thread to finish.
pub fn shutdown(state: &AppState) -> Result<(), ControlError> {
    match send(state, GameLoopCommand::Shutdown) {
        Ok(()) => {}
        // The loop already ended on its own; its handle still needs joining.
        Err(ControlError::Disconnected) => log::warn!("game loop had already stopped"),
        Err(e) => return Err(e),
    }
    state
        .command_tx
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take();

    let handle = state
        .loop_handle
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take();
    if let Some(handle) = handle {
        if handle.join().is_err() {
            log::error!("game loop thread panicked");
        }
    }
    log::info!("game loop stopped");
    Ok(())
}
