//! Flat-file persistence for the album collection.
//!
//! The whole collection is one JSON document. It is read in full on every
//! load and rewritten in full on every save; nothing is cached in between.

use crate::domain::album::{Album, AlbumCollection};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode albums for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of truth for the album collection between requests.
#[async_trait]
pub trait AlbumStore: Send + Sync {
    /// Reads the complete collection.
    async fn load(&self) -> Result<AlbumCollection, StorageError>;

    /// Replaces the complete persisted collection with `albums`.
    async fn save(&self, albums: &AlbumCollection) -> Result<(), StorageError>;
}

/// Stores the collection as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with `seed` when it does not exist yet.
    ///
    /// Returns `true` if the file was created.
    pub async fn ensure_exists(&self, seed: &AlbumCollection) -> Result<bool, StorageError> {
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => Ok(false),
            Ok(false) => {
                self.save(seed).await?;
                Ok(true)
            }
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn parse(&self, content: &[u8]) -> Result<AlbumCollection, StorageError> {
        // A `null` document is an empty collection.
        let albums: Option<Vec<Album>> =
            serde_json::from_slice(content).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(AlbumCollection::new(albums.unwrap_or_default()))
    }
}

#[async_trait]
impl AlbumStore for JsonFileStore {
    async fn load(&self) -> Result<AlbumCollection, StorageError> {
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })?;
        self.parse(&content)
    }

    async fn save(&self, albums: &AlbumCollection) -> Result<(), StorageError> {
        let mut content = serde_json::to_vec(albums).map_err(|source| StorageError::Encode {
            path: self.path.clone(),
            source,
        })?;
        content.push(b'\n');
        // Creates or truncates; a failure part-way can leave a short file behind.
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })
    }
}
