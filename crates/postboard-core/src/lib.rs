//! Postboard Core Library
//!
//! This crate provides the storage core for Postboard, a small message
//! board whose posts live in a single JSON document.
//!
//! # Architecture
//!
//! - **Document**: the whole board (posts plus id counter) is the unit of
//!   persistence; every mutation rewrites it
//! - **Store**: CRUD surface with validation, filtering and sorting
//! - **DocumentStorage**: pluggable backend (JSON file or memory)
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open(&Config::load()?);
//!
//! // Add a post
//! let post = store.create(&NewPost::new("Anna", "Hello", "First post!"))?;
//!
//! // Query posts
//! let posts = store.list(&PostFilter::by_author("ann"))?;
//! ```
//!
//! # Modules
//!
//! - `store`: CRUD operations over the board (main entry point)
//! - `models`: Post, Document, filters and export snapshot
//! - `validation`: field rules for new posts
//! - `storage`: document persistence backends
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod storage;
pub mod store;
pub mod validation;

pub use config::Config;
pub use models::{Document, NewPost, Post, PostFilter, Snapshot, Statistics};
pub use storage::{DocumentStorage, JsonFileStorage, MemoryStorage, StorageError, StorageResult};
pub use store::{Store, StoreError, StoreResult};
pub use validation::ValidationError;
