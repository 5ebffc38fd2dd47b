//! Draft context - dependency container for drafts
//!
//! Holds the collaborators and configuration shared by every draft a client opens.

use std::sync::Arc;

use draft_common::{AppConfig, DraftConfig};
use draft_core::{DraftResult, MentionSearch, MessageTransport};

use super::draft::Draft;
use super::error::{ServiceError, ServiceResult};
use super::resolver::MentionResolver;

/// Draft context containing all dependencies
#[derive(Clone)]
pub struct DraftContext {
    search: Arc<dyn MentionSearch>,
    transport: Arc<dyn MessageTransport>,
    config: DraftConfig,
}

impl DraftContext {
    /// Create a new draft context
    pub fn new(
        search: Arc<dyn MentionSearch>,
        transport: Arc<dyn MessageTransport>,
        config: DraftConfig,
    ) -> Self {
        Self {
            search,
            transport,
            config,
        }
    }

    /// Create a context configured from the environment
    ///
    /// # Errors
    /// Returns `ServiceError::Config` if a variable holds an invalid value
    pub fn from_env(
        search: Arc<dyn MentionSearch>,
        transport: Arc<dyn MessageTransport>,
    ) -> ServiceResult<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self::new(search, transport, config.draft))
    }

    pub fn builder() -> DraftContextBuilder {
        DraftContextBuilder::new()
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    pub fn transport(&self) -> Arc<dyn MessageTransport> {
        Arc::clone(&self.transport)
    }

    /// Build a resolver over this context's search collaborator
    pub fn resolver(&self) -> MentionResolver {
        MentionResolver::new(Arc::clone(&self.search), &self.config)
    }

    /// Open an empty draft
    pub fn new_draft(&self) -> Draft {
        Draft::new(self)
    }

    /// Open a draft holding `text`
    ///
    /// # Errors
    /// Returns `DraftError::ContentTooLong` if `text` exceeds the configured maximum
    pub fn draft_with_text(&self, text: &str) -> DraftResult<Draft> {
        Draft::with_text(self, text)
    }
}

impl std::fmt::Debug for DraftContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftContext")
            .field("search", &"MentionSearch")
            .field("transport", &"MessageTransport")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for creating DraftContext with custom configuration
pub struct DraftContextBuilder {
    search: Option<Arc<dyn MentionSearch>>,
    transport: Option<Arc<dyn MessageTransport>>,
    config: DraftConfig,
}

impl DraftContextBuilder {
    pub fn new() -> Self {
        Self {
            search: None,
            transport: None,
            config: DraftConfig::default(),
        }
    }

    pub fn search(mut self, search: Arc<dyn MentionSearch>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn MessageTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn config(mut self, config: DraftConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the DraftContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` if a collaborator is missing
    pub fn build(self) -> ServiceResult<DraftContext> {
        Ok(DraftContext::new(
            self.search.ok_or(ServiceError::MissingDependency("search"))?,
            self.transport
                .ok_or(ServiceError::MissingDependency("transport"))?,
            self.config,
        ))
    }
}

impl Default for DraftContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
