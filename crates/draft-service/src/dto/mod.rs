//! Data transfer objects and collaborator boundary mappers

pub mod mappers;
pub mod responses;

pub use mappers::{send_outcome_from, suggestion_from_hit};
pub use responses::SendOutcome;
