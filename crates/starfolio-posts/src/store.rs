//! Where post documents come from.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

/// File extension of post documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// A source of raw post documents keyed by slug.
pub trait DocumentStore: Send + Sync {
    /// Every document id, in a stable order.
    fn list_ids(&self) -> Result<Vec<String>, StoreError>;

    /// Raw text of a document, or `None` if there is no such id.
    fn read(&self, id: &str) -> Result<Option<String>, StoreError>;
}

/// Posts stored as `<root>/<slug>.md`.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        if !is_valid_id(id) {
            return None;
        }
        Some(self.root.join(format!("{id}.{DOCUMENT_EXTENSION}")))
    }
}

/// Ids name a file directly under the root and nothing else.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

impl DocumentStore for FsDocumentStore {
    fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "posts directory missing");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION)
            {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if is_valid_id(stem) => ids.push(stem.to_string()),
                _ => debug!(path = %path.display(), "skipping unaddressable document"),
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<Option<String>, StoreError> {
        let Some(path) = self.path_for(id) else {
            debug!(id, "rejected document id");
            return Ok(None);
        };
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/// In-memory store, used by tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: BTreeMap<String, String>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(id.into(), text.into());
    }

    pub fn with(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(id, text);
        self
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn read(&self, id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.documents.get(id).cloned())
    }
}
