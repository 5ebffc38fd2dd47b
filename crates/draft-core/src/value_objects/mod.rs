//! Value objects - immutable types that represent domain concepts

mod draft_id;
mod mention_target;
mod text_range;

pub use draft_id::DraftId;
pub use mention_target::{MentionKind, MentionTarget, Trigger};
pub use text_range::TextRange;
