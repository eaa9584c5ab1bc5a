//! Game loop thread: steps the engine at the configured frame rate.
//!
//! The engine is created inside the thread and never leaves it. Commands
//! arrive over an `mpsc` channel; input events are forwarded to the engine's
//! channel-backed input collaborator so they are only seen at the next tick's
//! apply-input stage. Every rendered snapshot is reduced to a `FrameView` and
//! stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use horde_core::config::Settings;
use horde_core::events::Effect;
use horde_core::input::InputEvent;
use horde_core::state::FrameView;
use horde_sim::{ChannelInput, EffectHandler, Engine};

use crate::state::{GameLoopCommand, SharedFrame};

/// Nominal duration of one frame.
pub fn tick_duration(frame_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(frame_rate.max(1)))
}

/// Effect handler that publishes render frames and logs game over.
pub struct FramePublisher<'a> {
    latest: &'a Mutex<Option<FrameView>>,
    frames: u64,
}

impl<'a> FramePublisher<'a> {
    pub fn new(latest: &'a Mutex<Option<FrameView>>) -> Self {
        Self { latest, frames: 0 }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl EffectHandler for FramePublisher<'_> {
    fn handle(&mut self, effect: &Effect) {
        match effect {
            Effect::Render { world } => {
                let frame = FrameView::from_world(world);
                if log::log_enabled!(log::Level::Trace) {
                    match serde_json::to_string(&frame) {
                        Ok(json) => log::trace!("frame {}: {json}", self.frames),
                        Err(e) => log::warn!("frame {} not serializable: {e}", self.frames),
                    }
                }
                match self.latest.lock() {
                    Ok(mut lock) => *lock = Some(frame),
                    Err(_) => {
                        log::warn!("frame {} dropped: shared state lock poisoned", self.frames)
                    }
                }
                self.frames += 1;
            }
            Effect::GameOver { score } => {
                log::info!("GAME OVER, score {score}, press R or click to restart");
            }
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    settings: Settings,
    latest_frame: SharedFrame,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("horde-game-loop".into())
        .spawn(move || {
            run_game_loop(&settings, cmd_rx, &latest_frame);
        })?;

    Ok((cmd_tx, handle))
}

/// Forward every pending command. Returns false once the loop should end.
fn drain_commands(
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    input_tx: &mpsc::Sender<InputEvent>,
) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Input(event)) => {
                if input_tx.send(event).is_err() {
                    log::trace!("input {event:?} dropped, engine input closed");
                }
            }
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    settings: &Settings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_frame: &Mutex<Option<FrameView>>,
) {
    let (input_tx, input) = ChannelInput::channel();
    let mut engine = Engine::from_settings(settings, Box::new(input));
    let mut publisher = FramePublisher::new(latest_frame);

    let clock = Instant::now();
    if let Err(e) = engine.start(Engine::initial_world(settings), 0.0) {
        log::error!("could not start engine: {e}");
        return;
    }

    let frame = tick_duration(settings.driver.frame_rate);
    let mut next_tick_time = Instant::now();

    while drain_commands(&cmd_rx, &input_tx) {
        engine.step(clock.elapsed().as_secs_f64(), &mut publisher);

        next_tick_time += frame;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > frame * 2 {
            // Too far behind, skip ahead instead of catching up.
            next_tick_time = now;
        }
    }

    if let Err(e) = engine.stop() {
        log::warn!("{e}");
    }
    log::debug!("game loop exiting after {} frames", publisher.frames());
}
