//! JSON file record store.
//!
//! `JsonFileStore` keeps the record table in a single JSON file. The file is
//! the only source of truth: every write takes an exclusive lock on a sibling
//! `.lock` file, re-reads the table, applies the change and writes the result
//! back. Independent handles, in this process or another one, therefore never
//! overwrite each other's records.
//!
//! Writes go to a sibling temporary file that is then renamed over the store
//! file, so a crash or a failed write leaves the previous table on disk. This
//! makes [`RecordStore::apply`] all-or-nothing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mlindex_fts::JsonFileStore;
//!
//! let store = JsonFileStore::open(&records_path)?;
//! let stats = computer.update_index(&resource, &schema, &instance, &store).await?;
//! ```

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use mlindex_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::plan::{ApplyStats, IndexPlan};
use crate::record::{IndexRecord, LanguageFilter, RecordKey, ResourceId};
use crate::store::{RecordStore, RecordTable};
use crate::vector::SearchVector;

/// On-disk format version.
///
/// Increment this when the record layout changes.
pub const STORE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    format_version: u32,
    updated_at: String,
    records: RecordTable,
}

/// Record store persisted as a JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes the writers of this handle before they reach the file lock.
    writer: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store; it is created on the first write.
    /// Returns `Err` if the file exists but cannot be parsed or has another
    /// format version.
    pub fn open(path: &Path) -> Result<Self> {
        if Self::load(path)?.is_none() {
            log::debug!("No record store at {}, starting empty", path.display());
        }

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(()),
        })
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table stored at `path`, if any.
    pub fn load(path: &Path) -> Result<Option<RecordTable>> {
        match std::fs::read_to_string(path) {
            Ok(content) => parse_table(&content).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io_with_path(e, path)),
        }
    }

    async fn read_table(&self) -> Result<RecordTable> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => parse_table(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(RecordTable::new()),
            Err(e) => Err(Error::io_with_path(e, &self.path)),
        }
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    /// Block until this process holds the exclusive lock on the store.
    ///
    /// The lock is released when the returned file is dropped.
    async fn lock_exclusive(&self) -> Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io_with_path(e, parent))?;
        }

        let lock_path = self.lock_path();
        tokio::task::spawn_blocking(move || {
            let file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(&lock_path)
                .map_err(|e| Error::io_with_path(e, &lock_path))?;
            file.lock().map_err(|e| Error::io_with_path(e, &lock_path))?;
            Ok(file)
        })
        .await
        .map_err(|e| Error::store(format!("Record store lock task failed: {e}")))?
    }

    async fn persist(&self, table: &RecordTable) -> Result<()> {
        let file = StoreFile {
            format_version: STORE_FORMAT_VERSION,
            updated_at: Utc::now().to_rfc3339(),
            records: table.clone(),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| Error::store(format!("Failed to serialize records: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| Error::io_with_path(e, &tmp))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Error::io_with_path(e, &self.path))?;

        Ok(())
    }

    /// Run `mutate` on the current on-disk table under the store lock and
    /// write the result back if it changed.
    async fn commit<T>(&self, mutate: impl FnOnce(&mut RecordTable) -> T) -> Result<T> {
        let _writer = self.writer.lock().await;
        let _lock = self.lock_exclusive().await?;

        let current = self.read_table().await?;
        let mut next = current.clone();
        let out = mutate(&mut next);
        if next != current {
            self.persist(&next).await?;
        } else {
            log::trace!("Record store {} unchanged", self.path.display());
        }
        Ok(out)
    }
}

fn parse_table(content: &str) -> Result<RecordTable> {
    let file: StoreFile = serde_json::from_str(content)
        .map_err(|e| Error::parse(format!("Invalid record store JSON: {e}")))?;

    if file.format_version != STORE_FORMAT_VERSION {
        return Err(Error::store(format!(
            "Record store format mismatch: stored={}, current={}",
            file.format_version, STORE_FORMAT_VERSION
        )));
    }

    Ok(file.records)
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn upsert(&self, key: RecordKey, vector: SearchVector) -> Result<bool> {
        self.commit(|table| table.upsert(key, vector)).await
    }

    async fn delete_where(
        &self,
        resource: &ResourceId,
        index_name: &str,
        filter: &LanguageFilter,
    ) -> Result<usize> {
        self.commit(|table| table.delete_where(resource, index_name, filter))
            .await
    }

    async fn records_for(&self, resource: &ResourceId) -> Result<Vec<IndexRecord>> {
        Ok(self.read_table().await?.records_for(resource))
    }

    async fn apply(&self, plan: &IndexPlan) -> Result<ApplyStats> {
        let stats = self.commit(|table| table.apply(plan)).await?;
        log::debug!(
            "Committed {} op(s) for resource {} to {}",
            plan.len(),
            plan.resource,
            self.path.display()
        );
        Ok(stats)
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
