//! In-memory storage backend
//!
//! Used by tests and by `postboard serve --in-memory`.

use std::sync::{Arc, RwLock};

use super::error::{StorageError, StorageResult};
use super::{parse_document, to_json, DocumentStorage};
use crate::models::Document;

/// In-memory document storage.
///
/// Keeps the serialized JSON rather than the value, so loads go through the
/// same parsing as the file backend. Cloning shares the same content.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    content: Arc<RwLock<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw JSON, e.g. to simulate a corrupted file
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Arc::new(RwLock::new(Some(content.into()))),
        }
    }

    /// Currently stored JSON, if any
    pub fn content(&self) -> StorageResult<Option<String>> {
        let content = self
            .content
            .read()
            .map_err(|_| StorageError::LockPoisoned("memory read"))?;
        Ok(content.clone())
    }
}

impl DocumentStorage for MemoryStorage {
    fn load(&self) -> StorageResult<Option<Document>> {
        let Some(content) = self.content()? else {
            return Ok(None);
        };

        parse_document(&content, self.location()).map(Some)
    }

    fn save(&self, document: &Document) -> StorageResult<()> {
        let json = to_json(document)?;
        let mut content = self
            .content
            .write()
            .map_err(|_| StorageError::LockPoisoned("memory write"))?;
        *content = Some(json);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_saved() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());

        storage.save(&Document::new()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(Document::new()));
    }

    #[test]
    fn clone_shares_content() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();

        storage.save(&Document::new()).unwrap();
        assert!(clone.content().unwrap().is_some());
    }

    #[test]
    fn malformed_content_is_rejected() {
        let storage = MemoryStorage::with_content("[]");
        assert!(matches!(
            storage.load(),
            Err(StorageError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn stale_last_id_is_rejected() {
        let storage = MemoryStorage::with_content(
            r#"{"posts":[{"id":5,"author":"Anna","subject":"Hello","message":"First post","createdAt":"2025-03-14T09:00:00.000Z","liked":false}],"lastId":0}"#,
        );

        let err = storage.load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidFormat { .. }));
        assert!(err.to_string().contains("lastId"));
    }
}
