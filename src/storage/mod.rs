pub mod file;

pub use file::{AlbumStore, JsonFileStore, StorageError};
