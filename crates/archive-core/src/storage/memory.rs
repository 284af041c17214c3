//! In-memory storage backend using DashMap (replaces the filesystem in tests)

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::error::Result;
use crate::records::RecordKind;
use crate::storage::DocumentStorage;

/// Keeps each document as an in-memory sequence. A kind that was never
/// saved loads as an empty sequence, like a missing file.
pub struct MemoryStorage {
    documents: DashMap<RecordKind, Vec<Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStorage for MemoryStorage {
    async fn load_sequence(&self, kind: RecordKind) -> Result<Vec<Value>> {
        Ok(self
            .documents
            .get(&kind)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn save_sequence(&self, kind: RecordKind, entries: &[Value]) -> Result<()> {
        self.documents.insert(kind, entries.to_vec());
        Ok(())
    }
}
