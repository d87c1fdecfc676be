//! State management module.
//!
//! This module contains the screen state machines and their logic:
//! - `MainMenu` - Title menu and text pages
//! - `LevelSelect` - Track list with audio previews
//! - `GameSession` - Active gameplay around a `JudgmentEngine`
//! - `Overlay` - Settings and text pages drawn over a screen
//!
//! Each screen implements common traits for snapshots, updates, and action handling.

pub mod game;
pub mod global;
pub mod level_select;
pub mod menu;
pub mod overlay;
pub mod session;
pub mod traits;

pub use global::GlobalState;
