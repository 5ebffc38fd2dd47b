//! Draft services
//!
//! The draft controller plus the pieces it orchestrates: mention
//! resolution, change observers and the shared dependency context.

pub mod context;
pub mod draft;
pub mod error;
pub mod observers;
pub mod resolver;

pub use context::{DraftContext, DraftContextBuilder};
pub use draft::Draft;
pub use error::{ServiceError, ServiceResult};
pub use observers::{DraftObserver, ObserverId, ObserverList};
pub use resolver::MentionResolver;
