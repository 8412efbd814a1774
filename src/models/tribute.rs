//! Wire and storage model for tribute entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single remembrance submitted to the memory tree.
///
/// Entries are immutable once stored; the store contract has no update or
/// delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TributeEntry {
    /// Store-assigned identifier.
    pub id: String,
    /// Submitter display name, trimmed, 1..=50 characters.
    pub name: String,
    /// Tribute text, trimmed, 1..=200 characters.
    pub message: String,
    /// Creation time assigned by the service at insert, never by the client.
    pub created_at: DateTime<Utc>,
}

/// Listing order requested by the caller. The stores themselves guarantee
/// only stable retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recent first, by `created_at`.
    #[default]
    Recent,
    /// Case-insensitive ascending by submitter name.
    Alphabetical,
}
