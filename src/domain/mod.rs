pub mod album;

pub use album::{Album, AlbumCollection, AlbumError};
