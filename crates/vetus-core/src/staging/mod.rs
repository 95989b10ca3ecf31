//! Handoff store for document hits.
//!
//! Document hits have no id the backend can resolve, so each one is staged
//! under a freshly minted time-ordered UUID when its card is built and only
//! the UUID travels in the link. Records are written once and never deleted
//! by normal flow: without a capacity the store grows until the cache
//! directory is cleared. With a capacity, the oldest records beyond it are
//! evicted after each write, sparing the records that write just minted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::model::DocumentHit;

/// Everything the document view needs to show a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Display name.
    pub doc_name: String,
    /// Path of the document on the backend host.
    pub source: String,
    /// Page number.
    pub page: Option<i64>,
    /// Paragraph position.
    pub paragraph_index: Option<i64>,
    /// Full paragraph text.
    pub paragraph: String,
}

impl From<&DocumentHit> for DocumentRecord {
    fn from(hit: &DocumentHit) -> Self {
        Self {
            doc_name: hit.display_name(),
            source: hit.doc_path.clone(),
            page: hit.page,
            paragraph_index: hit.paragraph_index,
            paragraph: hit.paragraph.clone(),
        }
    }
}

/// Directory-backed write-once record store shared by every window.
#[derive(Debug, Clone)]
pub struct StagingStore {
    dir: PathBuf,
    capacity: Option<usize>,
}

impl StagingStore {
    /// Opens a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, capacity: Option<usize>) -> Self {
        Self {
            dir: dir.into(),
            capacity,
        }
    }

    /// Default store directory under the user cache directory.
    #[must_use]
    pub fn default_location() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vetus")
            .join("staging")
    }

    /// Stages a record and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub async fn stage(&self, record: &DocumentRecord) -> Result<String> {
        let id = self.write(record).await?;
        self.enforce_capacity(std::slice::from_ref(&id)).await;
        Ok(id)
    }

    /// Stages every record, returning one id (or error) per record in order.
    ///
    /// Eviction runs once after the whole batch and never touches a record
    /// minted by it, so a batch larger than the capacity leaves the store
    /// over capacity until the next write.
    pub async fn stage_all(&self, records: &[DocumentRecord]) -> Vec<Result<String>> {
        let mut staged = Vec::with_capacity(records.len());
        for record in records {
            staged.push(self.write(record).await);
        }

        let minted: Vec<String> = staged
            .iter()
            .filter_map(|id| id.as_ref().ok().cloned())
            .collect();
        self.enforce_capacity(&minted).await;
        staged
    }

    /// Reads a staged record. Unknown or malformed ids yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or parsed.
    pub async fn get(&self, id: &str) -> Result<Option<DocumentRecord>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        match tokio::fs::read(self.record_path(&id.to_string())).await {
            Ok(contents) => Ok(Some(serde_json::from_slice(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of staged records.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be listed.
    pub async fn len(&self) -> Result<usize> {
        Ok(self.records().await?.len())
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Writes one record under a fresh time-ordered id.
    async fn write(&self, record: &DocumentRecord) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let id = Uuid::now_v7().to_string();
        let contents = serde_json::to_vec(record)?;
        tokio::fs::write(self.record_path(&id), contents).await?;
        debug!("Staged {:?} as {}", record.doc_name, id);
        Ok(id)
    }

    async fn enforce_capacity(&self, keep: &[String]) {
        if let Some(capacity) = self.capacity
            && let Err(e) = self.evict(capacity, keep).await
        {
            warn!("Staging eviction failed: {}", e);
        }
    }

    /// Staged record ids, oldest first.
    async fn records(&self) -> Result<Vec<Uuid>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| Uuid::parse_str(stem).ok())
            {
                records.push(id);
            }
        }
        // v7 ids sort by creation time.
        records.sort();
        Ok(records)
    }

    /// Removes the oldest records so at most `capacity` remain, never any in `keep`.
    async fn evict(&self, capacity: usize, keep: &[String]) -> Result<()> {
        let records = self.records().await?;
        if records.len() <= capacity {
            return Ok(());
        }

        let excess = records.len() - capacity;
        let evictable = records
            .into_iter()
            .map(|id| id.to_string())
            .filter(|id| !keep.contains(id));
        for id in evictable.take(excess) {
            debug!("Evicting staged record {}", id);
            tokio::fs::remove_file(self.record_path(&id)).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(name: &str) -> DocumentRecord {
        DocumentRecord {
            doc_name: name.to_string(),
            source: format!("/docs/{name}"),
            page: Some(3),
            paragraph_index: Some(1),
            paragraph: "lorem ipsum".to_string(),
        }
    }

    #[tokio::test]
    async fn staged_record_is_readable_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = StagingStore::new(dir.path().join("staging"), None);

        let id = store.stage(&record("a.pdf")).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), Some(record("a.pdf")));
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn every_stage_mints_a_new_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = StagingStore::new(dir.path(), None);

        let first = store.stage(&record("a.pdf")).await.unwrap();
        let second = store.stage(&record("a.pdf")).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = StagingStore::new(dir.path(), None);

        assert_eq!(store.get(&Uuid::now_v7().to_string()).await.unwrap(), None);
        assert_eq!(store.get("../../etc/passwd").await.unwrap(), None);
    }

    #[tokio::test]
    async fn capacity_evicts_down_to_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = StagingStore::new(dir.path(), Some(2));

        for name in ["a.pdf", "b.pdf", "c.pdf", "d.pdf"] {
            store.stage(&record(name)).await.unwrap();
        }
        let last = store.stage(&record("e.pdf")).await.unwrap();

        assert_eq!(store.len().await.unwrap(), 2);
        assert_eq!(store.get(&last).await.unwrap(), Some(record("e.pdf")));
    }

    #[tokio::test]
    async fn eviction_removes_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = StagingStore::new(dir.path(), Some(2));

        let a = store.stage(&record("a.pdf")).await.unwrap();
        let b = store.stage(&record("b.pdf")).await.unwrap();
        let c = store.stage(&record("c.pdf")).await.unwrap();

        assert_eq!(store.get(&a).await.unwrap(), None);
        assert_eq!(store.get(&b).await.unwrap(), Some(record("b.pdf")));
        assert_eq!(store.get(&c).await.unwrap(), Some(record("c.pdf")));
    }

    #[tokio::test]
    async fn batch_keeps_every_record_it_minted() {
        let dir = tempfile::tempdir().unwrap();
        let store = StagingStore::new(dir.path(), Some(2));
        let old = store.stage(&record("old.pdf")).await.unwrap();

        let batch = [record("a.pdf"), record("b.pdf"), record("c.pdf")];
        let ids: Vec<String> = store
            .stage_all(&batch)
            .await
            .into_iter()
            .map(|staged| staged.unwrap())
            .collect();

        assert_eq!(store.get(&old).await.unwrap(), None);
        for (id, expected) in ids.iter().zip(&batch) {
            assert_eq!(store.get(id).await.unwrap().as_ref(), Some(expected));
        }
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[test]
    fn record_from_hit_uses_display_name() {
        let hit = DocumentHit {
            doc_path: "C:\\docs\\report.docx".to_string(),
            doc_name: None,
            page: None,
            paragraph_index: Some(4),
            paragraph: "text".to_string(),
            score: Some(50.0),
        };
        let record = DocumentRecord::from(&hit);
        assert_eq!(record.doc_name, "report.docx");
        assert_eq!(record.source, "C:\\docs\\report.docx");
    }
}
