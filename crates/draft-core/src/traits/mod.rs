//! Collaborator traits (ports)

mod collaborators;

pub use collaborators::{CollaboratorError, MentionSearch, MessageTransport, SearchHit, SearchStream};
