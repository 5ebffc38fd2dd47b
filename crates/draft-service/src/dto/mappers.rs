//! Collaborator boundary mappers
//!
//! Explicit conversions from search and transport results into draft types.

use draft_core::{CollaboratorError, PendingSearch, SearchHit, SuggestedMention};

use super::responses::SendOutcome;

// ============================================================================
// Search Mappers
// ============================================================================

/// Turn a raw search hit into a suggestion for the search that produced it
pub fn suggestion_from_hit(search: &PendingSearch, hit: SearchHit) -> SuggestedMention {
    SuggestedMention::for_search(search, hit.target, hit.display_text)
}

// ============================================================================
// Transport Mappers
// ============================================================================

/// Map a transport result to the outcome reported to the caller
pub fn send_outcome_from(result: Result<(), CollaboratorError>) -> SendOutcome {
    match result {
        Ok(()) => SendOutcome::Sent,
        Err(err) => SendOutcome::failed(err.to_string()),
    }
}
