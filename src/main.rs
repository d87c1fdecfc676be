//! Application entry point and thread bootstrapper.

mod input;
mod logic;
mod models;
mod render;
mod shared;
mod state;
mod system;
mod views;

use crate::logic::audio::AudioManager;
use crate::models::settings::{SETTINGS_PATH, SettingsState};
use crate::render::terminal::Terminal;
use crate::state::GlobalState;
use crate::system::bus::SystemBus;
use env_logger::{Env, Target};
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// The terminal belongs to the game, so logs go to a file.
const LOG_PATH: &str = "lanefall.log";

fn init_logging() {
    match File::create(LOG_PATH) {
        Ok(file) => env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Pipe(Box::new(file)))
            .init(),
        Err(e) => {
            env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
                .target(Target::Stderr)
                .init();
            log::warn!("MAIN: Cannot open {}: {}", LOG_PATH, e);
        }
    }
}

fn main() -> io::Result<()> {
    init_logging();
    log::info!("MAIN: Booting Lanefall...");

    let bus = SystemBus::new();
    let audio_thread = logic::audio_thread::start_audio_thread(bus.clone());

    let settings_path = PathBuf::from(SETTINGS_PATH);
    let settings = SettingsState::load_from(&settings_path);
    let mut state = GlobalState::new(AudioManager::new(&bus), settings, settings_path);

    // The terminal is restored when it goes out of scope, before shutdown.
    let result = Terminal::new().and_then(|mut terminal| {
        input::start_thread(bus.clone(), input::manager::InputManager::new());
        logic::run(&bus, &mut state, &mut terminal)
    });

    state.shutdown();
    bus.request_shutdown();
    if audio_thread.join().is_err() {
        log::error!("MAIN: Audio thread panicked");
    }

    if let Err(e) = &result {
        log::error!("MAIN: {}", e);
    }
    log::info!("MAIN: Bye");
    result
}
