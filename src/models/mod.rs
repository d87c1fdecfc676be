pub mod engine;
pub mod selector;
pub mod settings;
pub mod stats;
pub mod track;
