//! Storage layer
//!
//! Persists the whole board `Document` as one unit. The `Store` talks to a
//! `DocumentStorage` backend:
//!
//! - **JsonFileStorage**: pretty-printed JSON file, replaced atomically
//! - **MemoryStorage**: serialized document kept in memory (tests, demos)

pub mod error;
pub mod memory;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use persistence::JsonFileStorage;

use std::path::PathBuf;

use crate::models::Document;

/// Backend that can load and replace the board document
pub trait DocumentStorage: Send + Sync {
    /// Load the persisted document.
    ///
    /// Returns `None` when nothing has been persisted yet and an error when
    /// content exists but cannot be parsed or has inconsistent ids.
    fn load(&self) -> StorageResult<Option<Document>>;

    /// Replace the persisted document with `document`
    fn save(&self, document: &Document) -> StorageResult<()>;

    /// Human-readable location, used in logs
    fn location(&self) -> String;
}

/// Serialize a document the way it is stored on disk (2-space indent)
pub fn to_json(document: &Document) -> StorageResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Parse stored JSON into a document.
///
/// Duplicate post ids or a `lastId` below an existing id count as malformed.
pub(crate) fn parse_document(content: &str, path: impl Into<PathBuf>) -> StorageResult<Document> {
    let checked = serde_json::from_str::<Document>(content)
        .map_err(|e| e.to_string())
        .and_then(|doc| doc.check_ids().map(|()| doc));

    checked.map_err(|details| StorageError::InvalidFormat {
        path: path.into(),
        details,
    })
}
