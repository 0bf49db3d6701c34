//! Weather glossary backed by a static JSON file.
//!
//! The file has the shape `{"glossary": [{"term": ..., "definition": ...}]}`.
//! The raw `glossary` list is cached until the file's modification time or
//! length changes, so edits are visible on the next read. Only lookups look
//! inside the entries; the whole-list read hands the list back as stored.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use percent_encoding::percent_decode_str;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::constants::TERM_NOT_FOUND;
use crate::error::GlossaryError;

/// Typed view of one list entry, used for lookups only.
#[derive(Debug, Deserialize)]
struct GlossaryEntry {
    term: String,
    definition: Value,
}

impl GlossaryEntry {
    fn definition_text(&self) -> String {
        match &self.definition {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GlossaryFile {
    glossary: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

struct Cached {
    stamp: FileStamp,
    entries: Arc<Vec<Value>>,
}

pub struct GlossaryStore {
    path: PathBuf,
    cache: RwLock<Option<Cached>>,
}

impl GlossaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the whole glossary list as pretty-printed JSON.
    pub async fn glossary_json(&self) -> Result<String, GlossaryError> {
        let entries = self.entries().await?;
        Ok(serde_json::to_string_pretty(entries.as_slice())?)
    }

    /// Looks up a percent-encoded term.
    ///
    /// Matching is exact and case-sensitive. If the file repeats a term the
    /// last occurrence wins. Entries without a string `term` and a
    /// `definition` are skipped.
    pub async fn lookup(&self, encoded_term: &str) -> Result<String, GlossaryError> {
        let term = percent_decode_str(encoded_term).decode_utf8_lossy();
        let entries = self.entries().await?;

        Ok(entries
            .iter()
            .rev()
            .filter_map(|entry| GlossaryEntry::deserialize(entry).ok())
            .find(|entry| entry.term == term)
            .map(|entry| entry.definition_text())
            .unwrap_or_else(|| TERM_NOT_FOUND.to_string()))
    }

    async fn entries(&self) -> Result<Arc<Vec<Value>>, GlossaryError> {
        let stamp = self.stamp().await;

        if let Some(stamp) = stamp {
            if let Some(cached) = self.cache.read().await.as_ref() {
                if cached.stamp == stamp {
                    tracing::debug!(path = %self.path.display(), "glossary cache hit");
                    return Ok(Arc::clone(&cached.entries));
                }
            }
        }

        let entries = Arc::new(self.load().await?);

        if let Some(stamp) = stamp {
            *self.cache.write().await = Some(Cached {
                stamp,
                entries: Arc::clone(&entries),
            });
        }

        Ok(entries)
    }

    async fn stamp(&self) -> Option<FileStamp> {
        let metadata = tokio::fs::metadata(&self.path).await.ok()?;
        Some(FileStamp {
            modified: metadata.modified().ok()?,
            len: metadata.len(),
        })
    }

    async fn load(&self) -> Result<Vec<Value>, GlossaryError> {
        tracing::info!(path = %self.path.display(), "loading glossary");

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| GlossaryError::Io {
                path: self.path.clone(),
                source,
            })?;

        let file: GlossaryFile =
            serde_json::from_str(&raw).map_err(|source| GlossaryError::Parse {
                path: self.path.clone(),
                source,
            })?;

        Ok(file.glossary)
    }
}
