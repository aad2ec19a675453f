//! History entry types
//!
//! A history item records one successfully completed query. Items are
//! immutable once created; the bounded store that holds them lives in the
//! agent crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which orchestrator produced the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Medication information lookup
    Info,
    /// Multi-drug interaction check
    Interaction,
    /// Document image analysis
    Document,
}

/// The recorded query text; shape depends on [`QueryKind`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryText {
    /// Medication name or document filename
    Single(String),
    /// Ordered medication list
    List(Vec<String>),
}

impl From<&str> for QueryText {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<Vec<String>> for QueryText {
    fn from(list: Vec<String>) -> Self {
        Self::List(list)
    }
}

/// A recorded past query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique token: creation millis plus a random hex suffix
    pub id: String,
    /// Producing orchestrator
    #[serde(rename = "type")]
    pub kind: QueryKind,
    /// Recorded query text
    pub query: QueryText,
    /// Creation instant (ISO-8601 on the wire)
    pub timestamp: DateTime<Utc>,
}

impl HistoryItem {
    /// Create a new entry stamped with the current instant
    pub fn new(kind: QueryKind, query: impl Into<QueryText>) -> Self {
        let now = Utc::now();
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("{}-{}", now.timestamp_millis(), &suffix[..8]),
            kind,
            query: query.into(),
            timestamp: now,
        }
    }
}
