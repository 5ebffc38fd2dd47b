//! Mention targets and trigger characters

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a mention points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum MentionTarget {
    User(String),
    Channel(String),
    Url(String),
}

impl MentionTarget {
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(id.into())
    }

    pub fn channel(id: impl Into<String>) -> Self {
        Self::Channel(id.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Searchable kind of this target, `None` for URLs
    pub fn kind(&self) -> Option<MentionKind> {
        match self {
            Self::User(_) => Some(MentionKind::User),
            Self::Channel(_) => Some(MentionKind::Channel),
            Self::Url(_) => None,
        }
    }

    /// Raw identifier (user id, channel id or URL)
    pub fn id(&self) -> &str {
        match self {
            Self::User(id) | Self::Channel(id) | Self::Url(id) => id,
        }
    }
}

impl fmt::Display for MentionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{id}"),
            Self::Channel(id) => write!(f, "channel:{id}"),
            Self::Url(url) => write!(f, "url:{url}"),
        }
    }
}

/// Kind of entity the search collaborator can look up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    User,
    Channel,
}

impl fmt::Display for MentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Channel => write!(f, "channel"),
        }
    }
}

/// Trigger character that opens a mention query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// `@` - user mention
    At,
    /// `#` - channel mention
    Hash,
}

impl Trigger {
    /// Map a character to its trigger, if any
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '@' => Some(Self::At),
            '#' => Some(Self::Hash),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::At => '@',
            Self::Hash => '#',
        }
    }

    /// Kind of entity this trigger searches for
    pub const fn kind(self) -> MentionKind {
        match self {
            Self::At => MentionKind::User,
            Self::Hash => MentionKind::Channel,
        }
    }
}
