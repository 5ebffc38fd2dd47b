//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use draft_core::{DraftLimits, InsideSpanPolicy};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub draft: DraftConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(format!("Invalid environment: {s}")),
        }
    }
}

/// Draft engine settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DraftConfig {
    /// Behaviour when text is typed strictly inside a mention
    #[serde(default)]
    pub inside_span_policy: InsideSpanPolicy,
    /// Maximum suggestions taken from one search
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Minimum query length after the trigger before a search starts
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Maximum draft length in characters
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Character that disables a directly following trigger
    #[serde(default = "default_escape_char")]
    pub escape_char: char,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            inside_span_policy: InsideSpanPolicy::default(),
            max_suggestions: default_max_suggestions(),
            min_query_len: default_min_query_len(),
            max_length: default_max_length(),
            escape_char: default_escape_char(),
        }
    }
}

impl DraftConfig {
    /// Limits enforced by the draft state
    #[must_use]
    pub fn limits(&self) -> DraftLimits {
        DraftLimits {
            inside_span_policy: self.inside_span_policy,
            max_length: self.max_length,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: InsideSpanPolicy) -> Self {
        self.inside_span_policy = policy;
        self
    }
}

// Default value functions
fn default_app_name() -> String {
    "draft-engine".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_suggestions() -> usize {
    10
}

fn default_min_query_len() -> usize {
    1
}

fn default_max_length() -> usize {
    4000
}

fn default_escape_char() -> char {
    '\\'
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparseable value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparseable value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_var(&lookup, "APP_ENV")?.unwrap_or_default(),
            },
            draft: DraftConfig {
                inside_span_policy: parse_var(&lookup, "DRAFT_INSIDE_SPAN_POLICY")?
                    .unwrap_or_default(),
                max_suggestions: parse_var(&lookup, "DRAFT_MAX_SUGGESTIONS")?
                    .unwrap_or_else(default_max_suggestions),
                min_query_len: parse_var(&lookup, "DRAFT_MIN_QUERY_LEN")?
                    .unwrap_or_else(default_min_query_len),
                max_length: parse_var(&lookup, "DRAFT_MAX_LENGTH")?
                    .unwrap_or_else(default_max_length),
                escape_char: parse_var(&lookup, "DRAFT_ESCAPE_CHAR")?
                    .unwrap_or_else(default_escape_char),
            },
        })
    }
}

/// Parse an optional variable, failing on present-but-invalid values
fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
