//! Filesystem page store
//!
//! One file per page, named `page_<N>.html`, holding the raw response text.
//! The file's modification time is the write timestamp.

use crate::cache::traits::{CachedPage, PageStore, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Page store backed by a cache directory
#[derive(Debug, Clone)]
pub struct FsPageStore {
    directory: PathBuf,
}

impl FsPageStore {
    /// Opens the store, creating the cache directory if it does not exist
    pub fn open(directory: impl Into<PathBuf>) -> StorageResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| StorageError::CreateDir {
            path: directory.clone(),
            source,
        })?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the cache file for a page
    pub fn path_for(&self, page: u32) -> PathBuf {
        self.directory.join(format!("page_{}.html", page))
    }
}

impl PageStore for FsPageStore {
    fn read(&self, page: u32) -> StorageResult<Option<CachedPage>> {
        let path = self.path_for(page);

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Read { path, source }),
        };

        let modified = metadata
            .modified()
            .map_err(|source| StorageError::Read {
                path: path.clone(),
                source,
            })?;

        let html = fs::read_to_string(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        Ok(Some(CachedPage {
            page,
            html,
            written_at: DateTime::<Utc>::from(modified),
        }))
    }

    fn write(&mut self, page: u32, html: &str) -> StorageResult<()> {
        let path = self.path_for(page);
        fs::write(&path, html).map_err(|source| StorageError::Write { path, source })
    }
}
