//! The Album Service.
//!
//! Sits between the HTTP handlers and the store. Every call:
//! 1.  Loads the full collection from the store.
//! 2.  Applies a pure lookup or mutation from `domain::album`.
//! 3.  For mutations, rewrites the full collection back to the store.
//!
//! Nothing survives between calls except the store itself.

use crate::domain::album::{Album, AlbumCollection, AlbumError};
use crate::storage::{AlbumStore, StorageError};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Album(#[from] AlbumError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub struct AlbumService {
    store: Arc<dyn AlbumStore>,
    /// Single-writer lock covering load -> mutate -> save of a mutation.
    ///
    /// `None` leaves concurrent writers free to interleave, and a write can
    /// then be lost.
    write_lock: Option<Mutex<()>>,
}

impl AlbumService {
    pub fn new(store: Arc<dyn AlbumStore>, serialize_writes: bool) -> Self {
        Self {
            store,
            write_lock: serialize_writes.then(|| Mutex::new(())),
        }
    }

    async fn lock_writes(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }

    pub async fn list(&self) -> ServiceResult<AlbumCollection> {
        Ok(self.store.load().await?)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Album> {
        let albums = self.store.load().await?;
        albums
            .find(id)
            .cloned()
            .ok_or_else(|| AlbumError::NotFound(id.to_string()).into())
    }

    /// Decodes `body` first, then appends it to the stored collection.
    /// Returns the full collection after the append.
    pub async fn create(&self, body: &[u8]) -> ServiceResult<AlbumCollection> {
        let album = Album::from_body(body)?;

        let _guard = self.lock_writes().await;
        let mut albums = self.store.load().await?;
        albums.insert(album)?;
        self.store.save(&albums).await?;
        debug!(count = albums.len(), "album created");
        Ok(albums)
    }

    /// Loads the collection first, then decodes `body` and replaces the
    /// album stored under `id` with it.
    pub async fn replace(&self, id: &str, body: &[u8]) -> ServiceResult<Album> {
        let _guard = self.lock_writes().await;
        let mut albums = self.store.load().await?;
        let album = Album::from_body(body)?;
        let replaced = albums.replace(id, album)?.clone();
        self.store.save(&albums).await?;
        debug!(id, "album replaced");
        Ok(replaced)
    }

    /// Removes the album stored under `id`. Returns the remaining collection.
    pub async fn delete(&self, id: &str) -> ServiceResult<AlbumCollection> {
        let _guard = self.lock_writes().await;
        let mut albums = self.store.load().await?;
        albums.remove(id)?;
        self.store.save(&albums).await?;
        debug!(id, remaining = albums.len(), "album deleted");
        Ok(albums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFileStore;
    use std::path::Path;

    async fn service_with(dir: &Path, seed: &str, serialize_writes: bool) -> AlbumService {
        let path = dir.join("albums.json");
        tokio::fs::write(&path, seed).await.unwrap();
        AlbumService::new(Arc::new(JsonFileStore::new(path)), serialize_writes)
    }

    const SEED: &str = r#"[{"id":"1","title":"A","artist":"X","price":9.99}]"#;

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(dir.path(), SEED, true).await;

        let albums = service
            .create(br#"{"id":"2","title":"B","artist":"Y","price":5}"#)
            .await
            .unwrap();
        assert_eq!(albums.len(), 2);

        let album = service.get("2").await.unwrap();
        assert_eq!(album.title, "B");
        assert_eq!(album.artist, "Y");
        assert_eq!(album.price, 5.0);
    }

    #[tokio::test]
    async fn create_with_existing_id_leaves_storage_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(dir.path(), SEED, true).await;

        let err = service
            .create(br#"{"id":"1","title":"Other"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Album(AlbumError::Conflict(_))));
        assert_eq!(service.list().await.unwrap().find("1").unwrap().title, "A");
    }

    #[tokio::test]
    async fn create_decodes_before_touching_storage() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(dir.path(), "corrupt", true).await;

        let err = service.create(b"{").await.unwrap_err();
        assert!(matches!(err, ServiceError::Album(AlbumError::MalformedBody(_))));
    }

    #[tokio::test]
    async fn replace_loads_storage_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(dir.path(), "corrupt", true).await;

        let err = service.replace("1", b"{").await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StorageError::Parse { .. })));
    }

    #[tokio::test]
    async fn replace_requires_matching_id() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(dir.path(), SEED, true).await;

        let err = service
            .replace("1", br#"{"id":"5","title":"Z"}"#)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Album(AlbumError::IdMismatch { .. })
        ));

        let replaced = service
            .replace("1", br#"{"id":"1","title":"A2","artist":"X","price":1}"#)
            .await
            .unwrap();
        assert_eq!(replaced.title, "A2");
        assert_eq!(service.get("1").await.unwrap().price, 1.0);
    }

    #[tokio::test]
    async fn delete_returns_remaining_albums() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(dir.path(), SEED, false).await;

        service.create(br#"{"id":"2"}"#).await.unwrap();
        let remaining = service.delete("1").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.as_slice()[0].id, "2");

        let err = service.delete("1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Album(AlbumError::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn serialized_writes_do_not_lose_updates() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(service_with(dir.path(), "[]", true).await);

        let mut tasks = Vec::new();
        for i in 0..32 {
            let service = service.clone();
            tasks.push(tokio::spawn(async move {
                let body = format!(r#"{{"id":"{}"}}"#, i);
                service.create(body.as_bytes()).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(service.list().await.unwrap().len(), 32);
    }
}
