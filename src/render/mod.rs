//! Terminal output: flushing the view grid to the screen.

pub mod terminal;
