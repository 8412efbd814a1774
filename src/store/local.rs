//! JSON-file tribute store, used when no remote credentials are configured
//! so the memory tree still works standalone.

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs;
use tokio::sync::Mutex;

use crate::models::tribute::TributeEntry;
use crate::moderation::SubmissionThrottle;
use crate::tribute;

use super::{StoreError, backend_error, seed};

/// File name mirrors the storage key the web client used.
pub const STORE_FILE_NAME: &str = "memory_tree_entries.json";

pub struct LocalStore {
    path: PathBuf,
    throttle: SubmissionThrottle,
    // Serializes the read-modify-write cycle across worker threads; the
    // single-threaded client this replaces got that ordering for free.
    file_lock: Mutex<()>,
}

impl LocalStore {
    /// Opens the store at `path`, creating parent directories as needed.
    /// Seeding is deferred to the first read.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| backend_error(err, "Failed to create local store directory"))?;
        }
        Ok(Self {
            path,
            throttle: SubmissionThrottle::new(),
            file_lock: Mutex::new(()),
        })
    }

    pub async fn list_entries(&self) -> Result<Vec<TributeEntry>, StoreError> {
        let _guard = self.file_lock.lock().await;
        self.read_or_seed().await
    }

    pub async fn add_entry(&self, name: &str, message: &str) -> Result<TributeEntry, StoreError> {
        let prepared = tribute::prepare_submission(name, message, &self.throttle)?;

        let _guard = self.file_lock.lock().await;
        let mut entries = self.read_or_seed().await?;

        let entry = TributeEntry {
            id: prepared.created_at.timestamp_millis().to_string(),
            name: prepared.name,
            message: prepared.message,
            created_at: prepared.created_at,
        };

        // New entries go first; the whole collection is rewritten.
        entries.insert(0, entry.clone());
        self.write_all(&entries).await?;

        Ok(entry)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        match fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            // Not seeded yet; the first read will create the file.
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(backend_error(err, "Local store path is inaccessible")),
        }
    }

    async fn read_or_seed(&self) -> Result<Vec<TributeEntry>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| backend_error(err, "Local store holds malformed JSON")),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let seeded = seed::seed_entries();
                self.write_all(&seeded).await?;
                Ok(seeded)
            }
            Err(err) => Err(backend_error(err, "Failed to read local store")),
        }
    }

    // Write-to-temp then rename, so a crash or a concurrent reader never
    // observes a half-written collection. Callers hold `file_lock`.
    async fn write_all(&self, entries: &[TributeEntry]) -> Result<(), StoreError> {
        let payload = serde_json::to_vec(entries)
            .map_err(|err| backend_error(err, "Failed to serialize local store"))?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload)
            .await
            .map_err(|err| backend_error(err, "Failed to write local store"))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|err| backend_error(err, "Failed to replace local store"))
    }
}
