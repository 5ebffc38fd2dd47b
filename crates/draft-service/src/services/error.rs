//! Service layer error types
//!
//! Wraps draft and configuration errors for callers that set up the engine.

use draft_common::ConfigError;
use draft_core::DraftError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Draft rule violation
    Draft(DraftError),

    /// Configuration could not be loaded
    Config(ConfigError),

    /// A required collaborator was not provided
    MissingDependency(&'static str),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::MissingDependency(name) => write!(f, "{name} is required"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Draft(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::MissingDependency(_) => None,
        }
    }
}

impl ServiceError {
    /// Get the error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Draft(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
            Self::MissingDependency(_) => "MISSING_DEPENDENCY",
        }
    }
}

impl From<DraftError> for ServiceError {
    fn from(err: DraftError) -> Self {
        Self::Draft(err)
    }
}

impl From<ConfigError> for ServiceError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
