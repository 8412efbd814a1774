//! Hosted tabular tribute store addressed by a service URL and access key,
//! speaking the PostgREST row protocol.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use reqwest::Response;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::config::RemoteStoreConfig;
use crate::models::tribute::TributeEntry;
use crate::moderation::SubmissionThrottle;
use crate::tribute;

use super::{StoreError, backend_error};

/// Table holding the tribute rows; the service assigns `id` on insert.
const TABLE: &str = "memory_tree";

pub struct RemoteStore {
    http: reqwest::Client,
    rows_url: String,
    throttle: SubmissionThrottle,
}

impl RemoteStore {
    /// Builds a fully wired client. Credentials are baked into default
    /// headers so individual calls carry no auth logic; no request is
    /// issued until the first operation.
    pub async fn connect(config: RemoteStoreConfig) -> Result<Self> {
        assert!(!config.url.is_empty(), "Remote store URL must be provided");
        assert!(
            !config.access_key.is_empty(),
            "Remote store access key must be provided"
        );

        let mut api_key = HeaderValue::from_str(&config.access_key)
            .context("Access key contains invalid header characters")?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.access_key))
            .context("Access key contains invalid header characters")?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("Failed to build remote store HTTP client")?;

        Ok(Self {
            http,
            rows_url: rows_url(&config.url),
            throttle: SubmissionThrottle::new(),
        })
    }

    /// All rows, most recent first. An empty table yields an empty list.
    pub async fn list_entries(&self) -> Result<Vec<TributeEntry>, StoreError> {
        let response = self
            .http
            .get(&self.rows_url)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|err| backend_error(err, "Remote store query failed"))?;
        let response = check_status(response)?;

        let rows: Vec<TributeRow> = response
            .json()
            .await
            .map_err(|err| backend_error(err, "Remote store returned malformed rows"))?;
        Ok(rows.into_iter().map(TributeRow::into_entry).collect())
    }

    pub async fn add_entry(&self, name: &str, message: &str) -> Result<TributeEntry, StoreError> {
        let prepared = tribute::prepare_submission(name, message, &self.throttle)?;

        let insert = NewTributeRow {
            name: &prepared.name,
            message: &prepared.message,
            created_at: prepared.created_at,
        };
        let response = self
            .http
            .post(&self.rows_url)
            .header("Prefer", "return=representation")
            .json(&[insert])
            .send()
            .await
            .map_err(|err| backend_error(err, "Remote store insert failed"))?;
        let response = check_status(response)?;

        let mut rows: Vec<TributeRow> = response
            .json()
            .await
            .map_err(|err| backend_error(err, "Remote store returned a malformed inserted row"))?;
        if rows.len() != 1 {
            return Err(StoreError::Backend(anyhow!(
                "Remote store returned {} rows for a single-row insert",
                rows.len()
            )));
        }
        Ok(rows.remove(0).into_entry())
    }

    /// Minimal read used by the readiness probe.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let response = self
            .http
            .get(&self.rows_url)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(|err| backend_error(err, "Remote store is unreachable"))?;
        check_status(response).map(|_| ())
    }
}

fn rows_url(base: &str) -> String {
    format!("{}/rest/v1/{TABLE}", base.trim_end_matches('/'))
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    response
        .error_for_status()
        .map_err(|err| backend_error(err, "Remote store rejected the request"))
}

/// Row shape owned by the hosted service. Depending on the deployment the
/// primary key column is a bigint or a uuid; both normalize to a string id.
#[derive(Debug, Deserialize)]
struct TributeRow {
    id: RowId,
    name: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl TributeRow {
    fn into_entry(self) -> TributeEntry {
        TributeEntry {
            id: self.id.into_string(),
            name: self.name,
            message: self.message,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    fn into_string(self) -> String {
        match self {
            Self::Text(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct NewTributeRow<'a> {
    name: &'a str,
    message: &'a str,
    created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_url_normalizes_trailing_slash() {
        assert_eq!(
            rows_url("https://project.example.co"),
            "https://project.example.co/rest/v1/memory_tree"
        );
        assert_eq!(
            rows_url("https://project.example.co/"),
            "https://project.example.co/rest/v1/memory_tree"
        );
    }

    #[test]
    fn row_deserializes_numeric_and_text_ids() {
        let numeric: TributeRow = serde_json::from_str(
            r#"{"id":7,"name":"Jane","message":"hello","created_at":"2024-01-15T10:30:00Z"}"#,
        )
        .expect("numeric id row");
        assert_eq!(numeric.into_entry().id, "7");

        let text: TributeRow = serde_json::from_str(
            r#"{"id":"b7f3","name":"Jane","message":"hello","created_at":"2024-01-15T10:30:00+00:00"}"#,
        )
        .expect("text id row");
        assert_eq!(text.into_entry().id, "b7f3");
    }

    #[test]
    fn insert_payload_omits_the_id_column() {
        let row = NewTributeRow {
            name: "Jane",
            message: "hello",
            created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .expect("valid timestamp")
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value([row]).expect("payload serializes");
        let object = &json[0];
        assert!(object.get("id").is_none());
        assert_eq!(object["name"], "Jane");
        assert_eq!(object["created_at"], "2024-01-15T10:30:00Z");
    }
}
