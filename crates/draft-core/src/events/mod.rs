//! Draft change events

mod draft_event;

pub use draft_event::{DraftChange, DraftStatus, DraftUpdate};
