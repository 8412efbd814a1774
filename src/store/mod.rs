//! Tribute persistence: the store error taxonomy, the two backing-store
//! adapters, and the config-driven factory that selects one per process.

pub mod local;
pub mod remote;
pub mod seed;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::StoreConfig;
use crate::models::tribute::TributeEntry;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Missing or oversized input; surfaced inline to the submitter.
    #[error("{0}")]
    Validation(String),
    /// Profanity match on name or message.
    #[error("Content not allowed")]
    ContentRejected,
    /// Same-name resubmission inside the throttle window.
    #[error("Please wait before adding another entry")]
    RateLimited,
    /// Transport or storage failure in the backing store.
    #[error("Tribute store failure: {0}")]
    Backend(#[source] anyhow::Error),
}

pub(crate) fn backend_error(err: impl Into<anyhow::Error>, context: &'static str) -> StoreError {
    StoreError::Backend(err.into().context(context))
}

/// Which backing store the factory selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Remote,
    Local,
}

/// The two interchangeable adapters behind one contract: list entries, add
/// an entry. Built once at startup and shared by every caller through
/// `AppState`; there is no runtime re-selection or fallback between them.
pub enum TributeStore {
    Remote(remote::RemoteStore),
    Local(local::LocalStore),
}

impl TributeStore {
    /// Builds the adapter the configuration calls for: remote when both the
    /// service URL and access key are present, local otherwise. The returned
    /// adapter is fully wired before first use.
    pub async fn from_config(config: &StoreConfig) -> Result<Self> {
        match config.remote() {
            Some(remote_config) => {
                let store = remote::RemoteStore::connect(remote_config)
                    .await
                    .context("Failed to initialize remote tribute store")?;
                Ok(Self::Remote(store))
            }
            None => {
                let path = config.data_dir().join(local::STORE_FILE_NAME);
                let store = local::LocalStore::open(path)
                    .await
                    .context("Failed to initialize local tribute store")?;
                Ok(Self::Local(store))
            }
        }
    }

    pub fn backend(&self) -> StoreBackend {
        match self {
            Self::Remote(_) => StoreBackend::Remote,
            Self::Local(_) => StoreBackend::Local,
        }
    }

    /// All stored entries in the backend's stable order: most recent first
    /// for the remote store, last-written order for the local store.
    pub async fn list_entries(&self) -> Result<Vec<TributeEntry>, StoreError> {
        match self {
            Self::Remote(store) => store.list_entries().await,
            Self::Local(store) => store.list_entries().await,
        }
    }

    /// Validates, moderates, and persists one submission. The entry is
    /// either fully stored or not stored at all.
    pub async fn add_entry(&self, name: &str, message: &str) -> Result<TributeEntry, StoreError> {
        match self {
            Self::Remote(store) => store.add_entry(name, message).await,
            Self::Local(store) => store.add_entry(name, message).await,
        }
    }

    /// Cheap readiness probe for `/health/ready`.
    pub async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Remote(store) => store.ping().await,
            Self::Local(store) => store.ping().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config(data_dir: &std::path::Path) -> StoreConfig {
        StoreConfig {
            data_dir: Some(data_dir.to_path_buf()),
            ..StoreConfig::default()
        }
    }

    #[tokio::test]
    async fn factory_selects_local_without_remote_credentials() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TributeStore::from_config(&local_config(dir.path()))
            .await
            .expect("local store builds");
        assert_eq!(store.backend(), StoreBackend::Local);
    }

    #[tokio::test]
    async fn factory_selects_remote_with_both_credentials() {
        let config = StoreConfig {
            url: Some("https://project.example.co".to_string()),
            access_key: Some("anon-key".to_string()),
            ..StoreConfig::default()
        };
        let store = TributeStore::from_config(&config)
            .await
            .expect("remote store builds without touching the network");
        assert_eq!(store.backend(), StoreBackend::Remote);
    }

    #[tokio::test]
    async fn factory_falls_back_to_local_when_remote_is_half_configured() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = StoreConfig {
            url: Some("https://project.example.co".to_string()),
            data_dir: Some(dir.path().to_path_buf()),
            ..StoreConfig::default()
        };
        let store = TributeStore::from_config(&config)
            .await
            .expect("local store builds");
        assert_eq!(store.backend(), StoreBackend::Local);
    }
}
