//! Multi-cell pictures stamped onto the grid.

use crate::models::engine::Lane;

/// Partial blocks, indexed by eighths of a cell filled from the bottom.
pub const BLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub const LOGO: [&str; 5] = [
    "█     ██  █  █ ████ ████  ██  █    █   ",
    "█    █  █ ██ █ █    █    █  █ █    █   ",
    "█    ████ █ ██ ███  ███  ████ █    █   ",
    "█    █  █ █  █ █    █    █  █ █    █   ",
    "████ █  █ █  █ ████ █    █  █ ████ ████",
];

pub const RECORD: [&str; 4] = [
    " .----. ",
    "/ .--. \\",
    "\\ '--' /",
    " '----' ",
];

const DIGIT_1: [&str; 5] = [" ██ ", "███ ", " ██ ", " ██ ", "████"];
const DIGIT_2: [&str; 5] = ["████", "   █", "████", "█   ", "████"];
const DIGIT_3: [&str; 5] = ["████", "   █", " ███", "   █", "████"];

/// Large countdown digit.
pub fn digit(n: u8) -> Option<&'static [&'static str]> {
    match n {
        1 => Some(&DIGIT_1),
        2 => Some(&DIGIT_2),
        3 => Some(&DIGIT_3),
        _ => None,
    }
}

/// Receptor arrow, three rows by four columns.
pub fn arrow(lane: Lane) -> [&'static str; 3] {
    match lane {
        Lane::Left => [" /  ", "<===", " \\  "],
        Lane::Down => [" || ", "\\||/", " \\/ "],
        Lane::Up => [" /\\ ", "/||\\", " || "],
        Lane::Right => ["  \\ ", "===>", "  / "],
    }
}
