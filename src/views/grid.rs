//! Character grid that every view draws into.
//!
//! The grid is a plain buffer of cells. Drawing outside of it is clipped, so
//! views can place text without checking bounds. A [`Region`] is a clipped
//! window into the grid with its own origin, used for panels and overlays.

use crate::models::stats::Rgb;

/// Size of the game screen in cells.
pub const ROWS: usize = 24;
pub const COLS: usize = 80;

pub const DEFAULT_FG: Rgb = [230, 230, 230];
pub const BRIGHT_FG: Rgb = [255, 255, 255];
pub const DEFAULT_BG: Rgb = [0, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: DEFAULT_FG,
        bg: DEFAULT_BG,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::BLANK; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        (row < self.rows && col < self.cols).then(|| &self.cells[row * self.cols + col])
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row < self.rows && col < self.cols {
            Some(&mut self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Text of one row, for tests and debugging.
    pub fn row_text(&self, row: usize) -> String {
        (0..self.cols)
            .filter_map(|col| self.cell(row, col))
            .map(|cell| cell.ch)
            .collect()
    }

    /// The whole grid as a drawable area.
    pub fn full(&mut self) -> Region<'_> {
        let (rows, cols) = (self.rows, self.cols);
        Region {
            grid: self,
            top: 0,
            left: 0,
            rows,
            cols,
        }
    }

    /// A window covering rows `top..bottom` and columns `left..right`.
    pub fn region(&mut self, top: usize, left: usize, bottom: usize, right: usize) -> Region<'_> {
        let bottom = bottom.min(self.rows);
        let right = right.min(self.cols);
        Region {
            grid: self,
            top,
            left,
            rows: bottom.saturating_sub(top),
            cols: right.saturating_sub(left),
        }
    }
}

/// Clipped, offset view into a [`Grid`].
pub struct Region<'a> {
    grid: &'a mut Grid,
    top: usize,
    left: usize,
    rows: usize,
    cols: usize,
}

impl<'a> Region<'a> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// A nested window, in coordinates relative to this region.
    pub fn sub(&mut self, top: usize, left: usize, bottom: usize, right: usize) -> Region<'_> {
        let bottom = bottom.min(self.rows);
        let right = right.min(self.cols);
        Region {
            grid: &mut *self.grid,
            top: self.top + top,
            left: self.left + left,
            rows: bottom.saturating_sub(top),
            cols: right.saturating_sub(left),
        }
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row < self.rows && col < self.cols {
            self.grid.cell_mut(self.top + row, self.left + col)
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, ch: char) {
        if let Some(cell) = self.cell_mut(row, col) {
            cell.ch = ch;
        }
    }

    pub fn set_colored(&mut self, row: usize, col: usize, ch: char, fg: Rgb) {
        if let Some(cell) = self.cell_mut(row, col) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    /// Writes `text` from `(row, col)`, clipped at the right edge.
    pub fn print(&mut self, row: usize, col: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.set(row, col + i, ch);
        }
    }

    pub fn print_colored(&mut self, row: usize, col: usize, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            self.set_colored(row, col + i, ch, fg);
        }
    }

    /// Fills columns `from..to` of a row with `ch`.
    pub fn hline(&mut self, row: usize, from: usize, to: usize, ch: char) {
        for col in from..to.min(self.cols) {
            self.set(row, col, ch);
        }
    }

    /// Fills rows `from..to` of a column with `ch`.
    pub fn vline(&mut self, col: usize, from: usize, to: usize, ch: char) {
        for row in from..to.min(self.rows) {
            self.set(row, col, ch);
        }
    }

    /// Recolors the foreground of a rectangle.
    pub fn tint(&mut self, top: usize, left: usize, bottom: usize, right: usize, fg: Rgb) {
        for row in top..bottom.min(self.rows) {
            for col in left..right.min(self.cols) {
                if let Some(cell) = self.cell_mut(row, col) {
                    cell.fg = fg;
                }
            }
        }
    }

    /// Draws a multi-line picture. Spaces are transparent.
    pub fn stamp(&mut self, row: usize, col: usize, lines: &[&str]) {
        for (dy, line) in lines.iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    self.set(row + dy, col + dx, ch);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(cell) = self.cell_mut(row, col) {
                    *cell = Cell::BLANK;
                }
            }
        }
    }

    /// Clears the region and frames it with half and full blocks.
    pub fn border(&mut self) {
        self.clear();
        if self.rows == 0 || self.cols == 0 {
            return;
        }
        let (last_row, last_col) = (self.rows - 1, self.cols - 1);
        self.hline(0, 0, self.cols, '▀');
        self.hline(last_row, 0, self.cols, '▄');
        self.vline(0, 0, self.rows, '█');
        self.vline(last_col, 0, self.rows, '█');
    }
}

/// Splits `text` into lines of at most `width` characters, breaking on
/// spaces. Words longer than `width` are cut.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width && width > 0 {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Formats seconds as `m:ss`.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printing_is_clipped() {
        let mut grid = Grid::new(3, 5);
        grid.full().print(1, 3, "abcdef");
        assert_eq!(grid.row_text(1), "   ab");

        grid.full().print(7, 0, "x");
        assert_eq!(grid.row_text(2), "     ");
    }

    #[test]
    fn regions_offset_and_clip() {
        let mut grid = Grid::new(4, 10);
        {
            let mut region = grid.region(1, 2, 3, 6);
            region.print(0, 0, "hello");
            region.print(1, 3, "xy");
            region.print(2, 0, "gone");
        }
        assert_eq!(grid.row_text(1), "  hell    ");
        assert_eq!(grid.row_text(2), "     x    ");
        assert_eq!(grid.row_text(3), "          ");
    }

    #[test]
    fn border_frames_region() {
        let mut grid = Grid::new(4, 6);
        grid.full().print(1, 1, "zzzz");
        grid.region(0, 0, 4, 6).border();
        assert_eq!(grid.row_text(0), "█▀▀▀▀█");
        assert_eq!(grid.row_text(1), "█    █");
        assert_eq!(grid.cell(3, 2).map(|c| c.ch), Some('▄'));
    }

    #[test]
    fn stamp_skips_spaces() {
        let mut grid = Grid::new(2, 4);
        grid.full().hline(0, 0, 4, '-');
        grid.full().stamp(0, 0, &["a  b"]);
        assert_eq!(grid.row_text(0), "a--b");
    }

    #[test]
    fn wrapping() {
        assert_eq!(
            wrap("PREVIEW NOT AVAILABLE SELECT TO DOWNLOAD", 21),
            vec!["PREVIEW NOT AVAILABLE", "SELECT TO DOWNLOAD"]
        );
        assert_eq!(wrap("abcdefgh ij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap("   ", 5).is_empty());
    }

    #[test]
    fn time_format() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(75.9), "1:15");
        assert_eq!(format_time(-3.0), "0:00");
    }
}
