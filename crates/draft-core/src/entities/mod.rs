//! Domain entities - the mutable parts of a draft

mod draft_state;
mod span;
mod span_table;
mod suggestion;
mod text_buffer;

pub use draft_state::{DraftLimits, DraftState};
pub use span::Span;
pub use span_table::{InsideSpanPolicy, SpanTable};
pub use suggestion::{PendingSearch, SuggestedMention};
pub use text_buffer::TextBuffer;
