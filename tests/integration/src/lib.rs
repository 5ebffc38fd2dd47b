//! Integration test utilities for the draft engine
//!
//! Mock collaborators and helpers for driving drafts end to end,
//! including the asynchronous suggestion path.

pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
