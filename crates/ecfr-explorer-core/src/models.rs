//! Core data models shared by the search, chat, and dashboard paths.
//!
//! Records are read-only once loaded. Chat messages are append-only and
//! owned by a [`ChatSession`](crate::session::ChatSession).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The facet sentinel meaning "no agency filter".
pub const ALL_FACET: &str = "All";

/// One regulation section in the record table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub title: String,
    pub part: String,
    pub section: String,
    pub agency: String,
    pub content: String,
    /// Precomputed static score in `[0.0, 1.0]`, used only for ordering.
    pub relevance: f64,
}

/// Agency filter applied alongside the text query.
///
/// Serialized as a bare string: `"All"` is the sentinel, anything else
/// names an agency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Facet {
    #[default]
    All,
    Agency(String),
}

impl Facet {
    /// Parse a user-supplied facet. `None` and `"All"` map to [`Facet::All`].
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => Facet::All,
            Some(v) => Facet::from(v.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    /// The agency name, or `None` for the sentinel.
    pub fn agency(&self) -> Option<&str> {
        match self {
            Facet::All => None,
            Facet::Agency(name) => Some(name),
        }
    }

    /// True if `record` passes this facet (exact agency match).
    pub fn admits(&self, record: &Record) -> bool {
        match self {
            Facet::All => true,
            Facet::Agency(name) => record.agency == *name,
        }
    }
}

impl From<String> for Facet {
    fn from(value: String) -> Self {
        if value == ALL_FACET {
            Facet::All
        } else {
            Facet::Agency(value)
        }
    }
}

impl From<Facet> for String {
    fn from(facet: Facet) -> Self {
        match facet {
            Facet::All => ALL_FACET.to_string(),
            Facet::Agency(name) => name,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::All => f.write_str(ALL_FACET),
            Facet::Agency(name) => f.write_str(name),
        }
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry in a chat session's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Monotonically increasing within a session, starting at 1.
    pub id: u64,
    pub role: Role,
    pub content: String,
    /// Agency selected when the message was created; `None` for `All`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
}
