//! Render/serialize step - turns text plus spans into consumer-facing shapes

mod elements;
mod payload;

pub use elements::{elements, DraftElement};
pub use payload::MessagePayload;
