//! JSON-file storage backend
//!
//! One file per document under a root directory. Writes overwrite the whole
//! file in place; there is no temp-file rename and no fsync, so a crash
//! mid-write can truncate a document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::records::RecordKind;
use crate::storage::DocumentStorage;

/// Flat-file backend holding one pretty-printed JSON array per record kind.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, kind: RecordKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentStorage for FileStorage {
    async fn load_sequence(&self, kind: RecordKind) -> Result<Vec<Value>> {
        let path = self.document_path(kind);

        // A document that was never written reads as empty; materialize it
        // so the storage folder always holds all three files.
        if !tokio::fs::try_exists(&path).await? {
            debug!("Creating empty {} document at {}", kind, path.display());
            tokio::fs::write(&path, "[]").await?;
            return Ok(Vec::new());
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let entries = serde_json::from_str(&contents)?;
        Ok(entries)
    }

    async fn save_sequence(&self, kind: RecordKind, entries: &[Value]) -> Result<()> {
        let path = self.document_path(kind);
        let contents = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&path, contents).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_document_reads_empty_and_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let entries = storage.load_sequence(RecordKind::Characters).await.unwrap();
        assert!(entries.is_empty());

        // The file now exists and holds an empty array
        let on_disk = std::fs::read_to_string(storage.root().join("characters.json")).unwrap();
        assert_eq!(on_disk, "[]");
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let entries = vec![
            json!({"topic": "The Sundering", "description": "An old war."}),
            json!({"topic": "Iron Pact", "description": "A dwarven treaty."}),
        ];
        storage
            .save_sequence(RecordKind::Lore, &entries)
            .await
            .unwrap();

        let loaded = storage.load_sequence(RecordKind::Lore).await.unwrap();
        assert_eq!(loaded, entries);
    }

    #[tokio::test]
    async fn test_documents_are_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let entries = vec![json!({"date": "2024-01-15", "event": "The gates fell."})];
        storage
            .save_sequence(RecordKind::Timeline, &entries)
            .await
            .unwrap();

        let on_disk = std::fs::read_to_string(storage.root().join("timeline.json")).unwrap();
        assert!(on_disk.contains('\n'), "expected indented output");
    }

    #[tokio::test]
    async fn test_corrupt_document_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        std::fs::write(storage.root().join("lore.json"), "{ not json").unwrap();

        let err = storage.load_sequence(RecordKind::Lore).await.unwrap_err();
        assert!(matches!(err, crate::ArchiveError::Json(_)));
    }
}
