pub mod store;

pub use store::{AlbumStore, JsonFileStore, StorageError};
