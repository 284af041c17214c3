//! Record types
//!
//! Three flat record kinds, each persisted as one JSON document holding an
//! ordered sequence. Characters and lore entries carry a case-insensitive
//! unique key; timeline events have no key and may repeat.

use serde::{Deserialize, Serialize};

/// The three persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Characters,
    Lore,
    Timeline,
}

impl RecordKind {
    /// On-disk file name for this document.
    pub fn file_name(&self) -> &'static str {
        match self {
            RecordKind::Characters => "characters.json",
            RecordKind::Lore => "lore.json",
            RecordKind::Timeline => "timeline.json",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Characters => write!(f, "characters"),
            RecordKind::Lore => write!(f, "lore"),
            RecordKind::Timeline => write!(f, "timeline"),
        }
    }
}

/// Record kinds carrying a case-insensitive unique key.
pub trait KeyedRecord {
    fn key(&self) -> &str;
}

/// Player or non-player character. `name` is the upsert key, unique under
/// case-insensitive comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub race: String,
    pub class_type: String,
    pub backstory: Option<String>,
}

impl KeyedRecord for Character {
    fn key(&self) -> &str {
        &self.name
    }
}

/// World lore entry. `topic` is the upsert key, unique under
/// case-insensitive comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lore {
    pub topic: String,
    pub description: String,
}

impl KeyedRecord for Lore {
    fn key(&self) -> &str {
        &self.topic
    }
}

/// Timeline event. No key; duplicate dates are allowed. `date` is a plain
/// string and sorts lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: String,
    pub event: String,
}
