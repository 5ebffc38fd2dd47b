//! # draft-core
//!
//! Domain layer of the message draft engine: text buffer, span table,
//! suggestions, rendering, errors, change events and collaborator traits.
//! This crate has no dependency on an async runtime.

pub mod entities;
pub mod error;
pub mod events;
pub mod render;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    DraftLimits, DraftState, InsideSpanPolicy, PendingSearch, Span, SpanTable, SuggestedMention,
    TextBuffer,
};
pub use error::{DraftError, DraftResult};
pub use events::{DraftChange, DraftStatus, DraftUpdate};
pub use render::{DraftElement, MessagePayload};
pub use traits::{CollaboratorError, MentionSearch, MessageTransport, SearchHit, SearchStream};
pub use value_objects::{DraftId, MentionKind, MentionTarget, TextRange, Trigger};
