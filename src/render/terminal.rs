//! Raw-mode terminal that presents a [`Grid`] centered on screen.
//!
//! Only cells that changed since the previous frame are written. A resize
//! forces a full redraw.

use crate::models::stats::Rgb;
use crate::views::grid::Grid;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};

/// Owns the terminal for the lifetime of the game.
///
/// Raw mode and the alternate screen are undone on drop, including when the
/// frame loop bails out with an error.
pub struct Terminal {
    out: Stdout,
    previous: Option<Grid>,
    size: (u16, u16),
    origin: (u16, u16),
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        log::info!("RENDER: Terminal ready");

        Ok(Self {
            out,
            previous: None,
            size: (0, 0),
            origin: (0, 0),
        })
    }

    /// Writes the cells that differ from the last presented grid.
    pub fn present(&mut self, grid: &Grid) -> io::Result<()> {
        let size = terminal::size()?;
        if size != self.size {
            log::debug!("RENDER: Terminal is {}x{}", size.0, size.1);
            self.size = size;
            self.origin = centered_origin(size, (grid.cols(), grid.rows()));
            self.previous = None;
            queue!(self.out, ResetColor, Clear(ClearType::All))?;
        }

        let mut colors: Option<(Rgb, Rgb)> = None;
        for row in 0..grid.rows() {
            let y = self.origin.1 as usize + row;
            if y >= size.1 as usize {
                break;
            }
            // Column the cursor sits on after the last print in this row.
            let mut cursor: Option<usize> = None;

            for col in 0..grid.cols() {
                let x = self.origin.0 as usize + col;
                if x >= size.0 as usize {
                    break;
                }
                let Some(cell) = grid.cell(row, col) else {
                    continue;
                };
                let previous = self.previous.as_ref().and_then(|p| p.cell(row, col));
                if previous == Some(cell) {
                    continue;
                }

                if cursor != Some(col) {
                    queue!(self.out, MoveTo(x as u16, y as u16))?;
                }
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.out,
                        SetForegroundColor(rgb(cell.fg)),
                        SetBackgroundColor(rgb(cell.bg))
                    )?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(self.out, Print(cell.ch))?;
                cursor = Some(col + 1);
            }
        }

        self.out.flush()?;
        self.previous = Some(grid.clone());
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::info!("RENDER: Terminal restored");
    }
}

fn rgb([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// Top-left corner that centers a `grid` (cols, rows) in a `term` (cols, rows).
fn centered_origin(term: (u16, u16), grid: (usize, usize)) -> (u16, u16) {
    let x = (term.0 as usize).saturating_sub(grid.0) / 2;
    let y = (term.1 as usize).saturating_sub(grid.1) / 2;
    (x as u16, y as u16)
}
