pub mod hit_window;
pub mod lane;
pub mod note;
pub mod playfield;

pub use hit_window::HitWindow;
pub use lane::{Lane, NUM_LANES};
pub use note::{Note, NoteId, NoteTimeline};
pub use playfield::PlayfieldConfig;
