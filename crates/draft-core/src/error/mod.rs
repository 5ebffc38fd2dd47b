//! Domain errors

mod draft_error;

pub use draft_error::{DraftError, DraftResult};
