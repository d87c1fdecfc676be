//! Frame loop and the audio plumbing it drives.
//!
//! The loop runs on the main thread at the frame rate set in the settings
//! and coordinates input, game state and terminal output.

pub mod assets;
pub mod audio;
pub mod audio_thread;
pub mod visualizer;

use crate::logic::audio::AudioPlayer;
use crate::render::terminal::Terminal;
use crate::state::GlobalState;
use crate::state::traits::Snapshot;
use crate::system::bus::SystemBus;
use crate::views::draw_frame;
use crate::views::grid::{COLS, Grid, ROWS};
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// Runs frames until the game quits.
///
/// Each frame:
/// 1. Applies every pending input action (hits land before the sweep)
/// 2. Ticks the active screen, which sweeps missed notes
/// 3. Draws a snapshot and flushes it to the terminal
/// 4. Sleeps for the rest of the frame budget
pub fn run<A: AudioPlayer>(
    bus: &SystemBus,
    state: &mut GlobalState<A>,
    terminal: &mut Terminal,
) -> io::Result<()> {
    log::info!("LOGIC: Frame loop started");
    let mut grid = Grid::new(ROWS, COLS);

    while state.is_running() && !bus.is_shutting_down() {
        let frame_start = Instant::now();

        while let Ok(action) = bus.action_rx.try_recv() {
            state.handle_action(action, Instant::now());
        }

        state.update(Instant::now());

        let frame = state.create_snapshot();
        draw_frame(&mut grid, &frame);
        terminal.present(&grid)?;

        let budget = frame_budget(state.fps());
        if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    log::info!("LOGIC: Frame loop stopped");
    Ok(())
}

fn frame_budget(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}
