//! Page store trait and error types
//!
//! The page cache only ever needs two things from its backing store: read a
//! page with its last-write time, and overwrite a page. Keeping the trait this
//! narrow lets the freshness policy be tested against an in-memory store.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during cache storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read cached page {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write cached page {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A cached search results page
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPage {
    /// Page index the HTML was fetched for
    pub page: u32,

    /// Raw response body
    pub html: String,

    /// When the page was last written to the store
    pub written_at: DateTime<Utc>,
}

/// Trait for page cache backends
pub trait PageStore {
    /// Reads a cached page, or None if the page was never stored
    fn read(&self, page: u32) -> StorageResult<Option<CachedPage>>;

    /// Stores a page, replacing any earlier copy
    fn write(&mut self, page: u32, html: &str) -> StorageResult<()>;
}
