//! Input thread bootstrapping: terminal key events to game actions.

pub mod events;
pub mod manager;

use crate::input::events::RawInputEvent;
use crate::input::manager::InputManager;
use crate::system::bus::SystemBus;
use crossterm::event::{self, Event};
use std::thread;
use std::time::Duration;

/// How often the input thread checks whether the game is shutting down.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn start_thread(bus: SystemBus, manager: InputManager) {
    thread::Builder::new()
        .name("Input Thread".to_string())
        .spawn(move || {
            log::info!("INPUT: Thread started");

            while !bus.is_shutting_down() {
                match event::poll(POLL_INTERVAL) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(e) => {
                        log::error!("INPUT: Failed to poll terminal: {}", e);
                        break;
                    }
                }

                let raw = match event::read() {
                    Ok(Event::Key(key)) => RawInputEvent::from_crossterm(&key),
                    Ok(_) => None,
                    Err(e) => {
                        log::error!("INPUT: Failed to read terminal event: {}", e);
                        break;
                    }
                };

                if let Some(action) = raw.and_then(|raw| manager.process(raw))
                    && let Err(e) = bus.action_tx.send(action)
                {
                    log::error!("INPUT: Failed to send action (Logic loop gone?): {}", e);
                    break;
                }
            }

            log::info!("INPUT: Thread stopped");
        })
        .expect("Failed to spawn Input thread");
}
