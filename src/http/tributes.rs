//! HTTP handlers for the memory tree wall: list tributes, add a tribute.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::models::tribute::{SortOrder, TributeEntry};
use crate::state::AppState;

use super::HttpError;

/// Upper bound on rows returned from one list call; the wall only renders
/// a bounded number of cards.
pub const MAX_LIST_LIMIT: usize = 500;

pub fn router() -> Router<AppState> {
    Router::new().route("/tributes", get(list_tributes).post(add_tribute))
}

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub sort: SortOrder,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct NewTributeRequest {
    pub name: String,
    pub message: String,
}

async fn list_tributes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TributeEntry>>, HttpError> {
    let entries = state.store.list_entries().await?;
    Ok(Json(shape_listing(entries, &query)))
}

async fn add_tribute(
    State(state): State<AppState>,
    Json(request): Json<NewTributeRequest>,
) -> Result<(StatusCode, Json<TributeEntry>), HttpError> {
    let entry = state.store.add_entry(&request.name, &request.message).await?;
    info!("Stored tribute {} from {}", entry.id, entry.name);
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Caller-side ordering and filtering over the store's stable listing,
/// matching the wall's search box and sort selector.
fn shape_listing(mut entries: Vec<TributeEntry>, query: &ListQuery) -> Vec<TributeEntry> {
    if let Some(needle) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let needle = needle.to_lowercase();
        entries.retain(|entry| entry.name.to_lowercase().contains(&needle));
    }

    match query.sort {
        SortOrder::Recent => entries.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Alphabetical => {
            entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
    }

    // limit=0 never corresponds to a real wall state; treat it as unset.
    let limit = query
        .limit
        .filter(|limit| *limit > 0)
        .unwrap_or(MAX_LIST_LIMIT)
        .min(MAX_LIST_LIMIT);
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn entry(id: &str, name: &str, created_at: &str) -> TributeEntry {
        TributeEntry {
            id: id.to_string(),
            name: name.to_string(),
            message: "a kind word".to_string(),
            created_at: DateTime::parse_from_rfc3339(created_at)
                .expect("valid timestamp")
                .with_timezone(&Utc),
        }
    }

    fn sample() -> Vec<TributeEntry> {
        vec![
            entry("1", "Sarah M.", "2024-01-15T10:30:00Z"),
            entry("2", "david K.", "2024-01-16T10:30:00Z"),
            entry("3", "Anna S.", "2024-01-14T10:30:00Z"),
        ]
    }

    #[test]
    fn default_listing_is_most_recent_first() {
        let shaped = shape_listing(sample(), &ListQuery::default());
        let ids: Vec<&str> = shaped.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["2", "1", "3"]);
    }

    #[test]
    fn alphabetical_sort_is_case_insensitive() {
        let query = ListQuery {
            sort: SortOrder::Alphabetical,
            ..ListQuery::default()
        };
        let shaped = shape_listing(sample(), &query);
        let names: Vec<&str> = shaped.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Anna S.", "david K.", "Sarah M."]);
    }

    #[test]
    fn search_filters_names_case_insensitively() {
        let query = ListQuery {
            search: Some(" DAV ".to_string()),
            ..ListQuery::default()
        };
        let shaped = shape_listing(sample(), &query);
        assert_eq!(shaped.len(), 1);
        assert_eq!(shaped[0].name, "david K.");

        // A blank search string is ignored, not matched literally.
        let query = ListQuery {
            search: Some("   ".to_string()),
            ..ListQuery::default()
        };
        assert_eq!(shape_listing(sample(), &query).len(), 3);
    }

    #[test]
    fn limit_caps_the_listing() {
        let query = ListQuery {
            limit: Some(2),
            ..ListQuery::default()
        };
        assert_eq!(shape_listing(sample(), &query).len(), 2);

        let query = ListQuery {
            limit: Some(MAX_LIST_LIMIT + 1),
            ..ListQuery::default()
        };
        assert_eq!(shape_listing(sample(), &query).len(), 3);
    }

    #[test]
    fn zero_limit_is_treated_as_unset() {
        let query = ListQuery {
            limit: Some(0),
            ..ListQuery::default()
        };
        assert_eq!(shape_listing(sample(), &query).len(), 3);
    }
}
