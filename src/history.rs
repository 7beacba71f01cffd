//! Bounded, persisted history of past summaries.
//!
//! The whole history lives in one JSON file and every mutation rewrites it in
//! full, an O(n) cost that is irrelevant at the 10-record bound. Writes go
//! through a temp file plus rename so a crash mid-write can never leave a
//! half-serialized history behind.
//!
//! Loading is deliberately forgiving: an absent or corrupt file yields an
//! empty history with a warning trace. Users lose stale history rather than
//! hitting an error they cannot act on.

use crate::error::BriefError;
use crate::record::SummaryRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Maximum number of records retained; older entries fall off the end.
pub const MAX_HISTORY: usize = 10;

/// File-backed store for [`SummaryRecord`]s, most recent first.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Open a store at an explicit file path. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store at its default platform location.
    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    /// The default history file location under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pdfbrief")
            .join("history.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history, recovering silently to empty on absence or
    /// corruption.
    pub async fn load(&self) -> Vec<SummaryRecord> {
        match self.load_strict().await {
            Ok(records) => records,
            Err(e) => {
                warn!("History unreadable, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Prepend a record, truncate to [`MAX_HISTORY`], persist, and return the
    /// updated history.
    pub async fn record(&self, item: SummaryRecord) -> Result<Vec<SummaryRecord>, BriefError> {
        let mut records = self.load().await;
        records.insert(0, item);
        records.truncate(MAX_HISTORY);
        self.persist(&records).await?;
        Ok(records)
    }

    /// Remove the record with the given id, persist, and return the updated
    /// history. Removing an unknown id is a no-op.
    pub async fn remove(&self, id: i64) -> Result<Vec<SummaryRecord>, BriefError> {
        let mut records = self.load().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            debug!("No history record with id {id}");
            return Ok(records);
        }
        self.persist(&records).await?;
        Ok(records)
    }

    /// Load without the silent-recovery wrapper.
    async fn load_strict(&self) -> Result<Vec<SummaryRecord>, BriefError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(BriefError::StorageCorrupt {
                    path: self.path.clone(),
                    detail: e.to_string(),
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| BriefError::StorageCorrupt {
            path: self.path.clone(),
            detail: e.to_string(),
        })
    }

    /// Atomic full rewrite: temp file in the same directory, then rename.
    async fn persist(&self, records: &[SummaryRecord]) -> Result<(), BriefError> {
        let io_err = |source| BriefError::StateWriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| BriefError::Internal(format!("History serialization: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await.map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(io_err)?;
        Ok(())
    }
}
