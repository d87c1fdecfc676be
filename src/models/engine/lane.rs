//! The four input lanes.

use std::fmt;

/// Number of lanes on the playfield.
pub const NUM_LANES: usize = 4;

/// One of the fixed input channels a note belongs to.
///
/// Lanes are ordered the way they are drawn, left to right:
/// left (`a`), down (`s`), up (`w`), right (`d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lane {
    Left,
    Down,
    Up,
    Right,
}

impl Lane {
    /// All lanes in draw order.
    pub const ALL: [Lane; NUM_LANES] = [Lane::Left, Lane::Down, Lane::Up, Lane::Right];

    /// Position of the lane in [`Lane::ALL`].
    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Down => 1,
            Lane::Up => 2,
            Lane::Right => 3,
        }
    }

    /// Keyboard key bound to this lane.
    pub fn key(self) -> char {
        match self {
            Lane::Left => 'a',
            Lane::Down => 's',
            Lane::Up => 'w',
            Lane::Right => 'd',
        }
    }

    /// Parses a lane from its key character (as used in track files).
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'a' => Some(Lane::Left),
            's' => Some(Lane::Down),
            'w' => Some(Lane::Up),
            'd' => Some(Lane::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_back_to_lanes() {
        for lane in Lane::ALL {
            assert_eq!(Lane::from_key(lane.key()), Some(lane));
        }
        assert_eq!(Lane::from_key('x'), None);
        assert_eq!(Lane::from_key('W'), Some(Lane::Up));
    }

    #[test]
    fn index_matches_draw_order() {
        for (i, lane) in Lane::ALL.iter().enumerate() {
            assert_eq!(lane.index(), i);
        }
    }
}
