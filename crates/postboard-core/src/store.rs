//! Post store
//!
//! The `Store` is the CRUD surface over the board document. Every operation
//! loads the whole document from its backend, works on it in memory and, for
//! mutations, writes the whole document back.
//!
//! Load-mutate-save runs under one in-process lock, so concurrent callers
//! sharing a `Store` never lose each other's updates. Separate processes
//! writing the same file are still last-writer-wins.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::open(&config);
//! store.load()?; // creates the data file on first run
//!
//! let post = store.create(&NewPost::new("Anna", "Hello", "First post!"))?;
//! store.toggle_like(post.id)?;
//!
//! let recent = store.list(&PostFilter::by_author("ann"))?;
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{self, Document, NewPost, Post, PostFilter, Snapshot};
use crate::storage::{DocumentStorage, JsonFileStorage, MemoryStorage, StorageError, StorageResult};
use crate::validation::{self, ValidationError};

/// Errors returned by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No post with ID {0}")]
    NotFound(u64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to one board document
pub struct Store {
    storage: Box<dyn DocumentStorage>,
    lock: Mutex<()>,
}

impl Store {
    /// Open the store backed by the configured data file
    ///
    /// Nothing is read until the first operation.
    pub fn open(config: &Config) -> Self {
        Self::with_storage(JsonFileStorage::from_config(config))
    }

    /// Store over an in-memory backend
    pub fn in_memory() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    /// Store over any backend
    pub fn with_storage(storage: impl DocumentStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            lock: Mutex::new(()),
        }
    }

    /// Where the document lives
    pub fn location(&self) -> String {
        self.storage.location()
    }

    /// Load the current document, creating and persisting an empty one if
    /// nothing has been stored yet.
    pub fn load(&self) -> StorageResult<Document> {
        let _guard = self.guard();
        self.load_unlocked()
    }

    /// Replace the persisted document
    pub fn save(&self, document: &Document) -> StorageResult<()> {
        let _guard = self.guard();
        self.storage.save(document)
    }

    /// Validate and append a new post
    pub fn create(&self, input: &NewPost) -> StoreResult<Post> {
        let valid = validation::validate(input)?;

        let post = self.update(|doc| {
            Ok(doc.add_post(valid.author, valid.subject, valid.message, models::now()))
        })?;

        info!(id = post.id, author = %post.author, "Created post");
        Ok(post)
    }

    /// Fetch one post
    pub fn get(&self, id: u64) -> StoreResult<Post> {
        let doc = self.load()?;
        doc.find(id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Flip the like flag of a post
    pub fn toggle_like(&self, id: u64) -> StoreResult<Post> {
        let post = self.update(|doc| {
            let post = doc.find_mut(id).ok_or(StoreError::NotFound(id))?;
            post.liked = !post.liked;
            Ok(post.clone())
        })?;

        info!(id, liked = post.liked, "Toggled like");
        Ok(post)
    }

    /// Remove a post, returning it
    pub fn delete(&self, id: u64) -> StoreResult<Post> {
        let post = self.update(|doc| doc.remove(id).ok_or(StoreError::NotFound(id)))?;

        info!(id, author = %post.author, "Deleted post");
        Ok(post)
    }

    /// Posts matching `filter`, most recent first.
    ///
    /// Posts created at the same instant keep their insertion order.
    pub fn list(&self, filter: &PostFilter) -> StoreResult<Vec<Post>> {
        let doc = self.load()?;

        let mut posts: Vec<Post> = doc
            .posts
            .into_iter()
            .filter(|post| filter.matches(post))
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(count = posts.len(), ?filter, "Listed posts");
        Ok(posts)
    }

    /// The document plus aggregate statistics
    pub fn export_snapshot(&self) -> StoreResult<Snapshot> {
        let doc = self.load()?;
        Ok(Snapshot::new(doc, models::now()))
    }

    /// Load, apply `f`, and persist, all under the lock.
    ///
    /// Nothing is written when `f` fails.
    fn update<T>(&self, f: impl FnOnce(&mut Document) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.guard();
        let mut doc = self.load_unlocked()?;
        let out = f(&mut doc)?;
        self.storage.save(&doc)?;
        Ok(out)
    }

    fn load_unlocked(&self) -> StorageResult<Document> {
        if let Some(doc) = self.storage.load()? {
            return Ok(doc);
        }

        let doc = Document::new();
        self.storage.save(&doc)?;
        info!(location = %self.storage.location(), "Initialized empty board");
        Ok(doc)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The lock guards no data, so a poisoned lock is still usable
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
