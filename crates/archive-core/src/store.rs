//! Record Store
//!
//! Durable CRUD-lite access to the three documents, with upsert-by-key
//! semantics for the keyed kinds. Every write is a full read-modify-rewrite
//! of one document, serialized by a per-document mutex so concurrent upserts
//! cannot lose an update.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{ArchiveError, Result};
use crate::records::{Character, KeyedRecord, Lore, RecordKind, TimelineEvent};
use crate::storage::DocumentStorage;

pub struct RecordStore {
    storage: Arc<dyn DocumentStorage>,
    characters_lock: Mutex<()>,
    lore_lock: Mutex<()>,
    timeline_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(storage: Arc<dyn DocumentStorage>) -> Self {
        Self {
            storage,
            characters_lock: Mutex::new(()),
            lore_lock: Mutex::new(()),
            timeline_lock: Mutex::new(()),
        }
    }

    /// Insert or replace a character, keyed case-insensitively on `name`.
    pub async fn upsert_character(&self, character: Character) -> Result<()> {
        info!("Upserting character: {}", character.name);
        let _guard = self.characters_lock.lock().await;
        self.upsert_by_key(RecordKind::Characters, character).await
    }

    /// Case-insensitive lookup by name.
    pub async fn get_character(&self, name: &str) -> Result<Character> {
        let characters: Vec<Character> = self.load_all(RecordKind::Characters).await?;
        let wanted = name.to_lowercase();
        characters
            .into_iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .ok_or_else(|| ArchiveError::NotFound(format!("Character '{}' not found", name)))
    }

    /// All characters in storage order (creation/replacement order).
    pub async fn list_characters(&self) -> Result<Vec<Character>> {
        self.load_all(RecordKind::Characters).await
    }

    /// Insert or replace a lore entry, keyed case-insensitively on `topic`.
    pub async fn upsert_lore(&self, lore: Lore) -> Result<()> {
        info!("Upserting lore: {}", lore.topic);
        let _guard = self.lore_lock.lock().await;
        self.upsert_by_key(RecordKind::Lore, lore).await
    }

    /// Case-insensitive lookup by topic.
    pub async fn get_lore(&self, topic: &str) -> Result<Lore> {
        let entries: Vec<Lore> = self.load_all(RecordKind::Lore).await?;
        let wanted = topic.to_lowercase();
        entries
            .into_iter()
            .find(|l| l.topic.to_lowercase() == wanted)
            .ok_or_else(|| ArchiveError::NotFound(format!("Lore '{}' not found", topic)))
    }

    /// All lore entries in storage order.
    pub async fn list_lore(&self) -> Result<Vec<Lore>> {
        self.load_all(RecordKind::Lore).await
    }

    /// Append a timeline event. No key, no dedup.
    pub async fn add_event(&self, event: TimelineEvent) -> Result<()> {
        info!("Adding timeline event: {}", event.date);
        let _guard = self.timeline_lock.lock().await;
        let mut events: Vec<TimelineEvent> = self.load_all(RecordKind::Timeline).await?;
        events.push(event);
        self.save_all(RecordKind::Timeline, &events).await
    }

    /// All events sorted ascending by date string. The sort is stable, so
    /// events sharing a date keep their insertion order.
    pub async fn list_events(&self) -> Result<Vec<TimelineEvent>> {
        let mut events: Vec<TimelineEvent> = self.load_all(RecordKind::Timeline).await?;
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }

    /// Filter-then-append upsert: drop every entry whose key matches the
    /// incoming key case-insensitively, append the new record, rewrite the
    /// document. An updated record therefore always moves to the end of
    /// storage order. The caller holds the document's write lock.
    async fn upsert_by_key<T>(&self, kind: RecordKind, record: T) -> Result<()>
    where
        T: Serialize + DeserializeOwned + KeyedRecord,
    {
        let key = record.key().to_lowercase();

        let mut entries: Vec<T> = self.load_all(kind).await?;
        entries.retain(|entry| entry.key().to_lowercase() != key);
        entries.push(record);

        self.save_all(kind, &entries).await
    }

    async fn load_all<T: DeserializeOwned>(&self, kind: RecordKind) -> Result<Vec<T>> {
        let raw = self.storage.load_sequence(kind).await?;
        debug!("Loaded {} entries from {}", raw.len(), kind);
        raw.into_iter()
            .map(|value| serde_json::from_value(value).map_err(ArchiveError::from))
            .collect()
    }

    async fn save_all<T: Serialize>(&self, kind: RecordKind, entries: &[T]) -> Result<()> {
        let raw = entries
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.storage.save_sequence(kind, &raw).await
    }
}
