use std::process::ExitCode;
use std::time::{Duration, Instant};

use horde_app::control;
use horde_app::demo::{demo_script, ScriptInput};
use horde_app::state::AppState;
use horde_core::config::Settings;

const DEMO_LENGTH: Duration = Duration::from_secs(12);

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => {
                log::info!("loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::error!("invalid settings in {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let script = demo_script(&settings.bounds, DEMO_LENGTH);
    let state = AppState::new();
    if let Err(e) = control::start_game(&state, settings) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    let started = Instant::now();
    for step in script {
        if let Some(wait) = step.at.checked_sub(started.elapsed()) {
            std::thread::sleep(wait);
        }
        let sent = match step.input {
            ScriptInput::Key { code, pressed } => {
                control::send_key(&state, code, pressed).map(|_| ())
            }
            ScriptInput::Event(event) => control::send_input(&state, event),
        };
        if let Err(e) = sent {
            log::error!("{e}");
            break;
        }
    }

    let frame = control::latest_frame(&state);
    if let Err(e) = control::shutdown(&state) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    match frame {
        Ok(Some(frame)) => {
            let enemies = frame.health_bars.len();
            log::info!(
                "final score {} (hp {}, {} enemies on field{})",
                frame.score,
                frame.player_hp,
                enemies,
                if frame.game_over { ", game over" } else { "" }
            );
            ExitCode::SUCCESS
        }
        Ok(None) => {
            log::warn!("no frame was rendered");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
