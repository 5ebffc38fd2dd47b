//! # draft-service
//!
//! Application layer: the draft controller, mention resolution and
//! collaborator orchestration, plus the DTOs handed back to callers.

pub mod dto;
pub mod services;

pub use dto::SendOutcome;
pub use services::{
    Draft, DraftContext, DraftContextBuilder, DraftObserver, MentionResolver, ObserverId,
    ServiceError, ServiceResult,
};
