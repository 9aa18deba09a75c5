pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::album_service::{AlbumService, ServiceError};
pub use domain::album::{Album, AlbumCollection, AlbumError};
pub use infra::config::{self, ServerConfig};
pub use storage::{AlbumStore, JsonFileStore, StorageError};
