//! Ordered album collection with linear-scan lookups.
//!
//! Every operation here is pure: callers load a collection, mutate it, and
//! decide whether to persist the result.

use crate::domain::album::{Album, AlbumError};
use serde::{Deserialize, Serialize};

/// All albums in insertion order. Serialized as a bare JSON array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct AlbumCollection(Vec<Album>);

impl AlbumCollection {
    pub fn new(albums: Vec<Album>) -> Self {
        Self(albums)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Album] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Album> {
        self.0
    }

    pub fn find(&self, id: &str) -> Option<&Album> {
        self.0.iter().find(|a| a.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|a| a.id == id)
    }

    /// Appends `album` unless an album with the same id is already present.
    pub fn insert(&mut self, album: Album) -> Result<(), AlbumError> {
        if self.find(&album.id).is_some() {
            return Err(AlbumError::Conflict(album.id));
        }
        self.0.push(album);
        Ok(())
    }

    /// Replaces the album stored under `id` in place.
    ///
    /// Absence is checked before the id of `album` is compared with `id`,
    /// so an unknown path id always reports `NotFound`.
    pub fn replace(&mut self, id: &str, album: Album) -> Result<&Album, AlbumError> {
        let index = self
            .position(id)
            .ok_or_else(|| AlbumError::NotFound(id.to_string()))?;
        if album.id != id {
            return Err(AlbumError::IdMismatch {
                path_id: id.to_string(),
                body_id: album.id,
            });
        }
        self.0[index] = album;
        Ok(&self.0[index])
    }

    /// Removes the album stored under `id`, shifting later albums left.
    pub fn remove(&mut self, id: &str) -> Result<Album, AlbumError> {
        let index = self
            .position(id)
            .ok_or_else(|| AlbumError::NotFound(id.to_string()))?;
        Ok(self.0.remove(index))
    }
}

impl From<Vec<Album>> for AlbumCollection {
    fn from(albums: Vec<Album>) -> Self {
        Self(albums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: &str, title: &str) -> Album {
        Album {
            id: id.to_string(),
            title: title.to_string(),
            artist: "X".to_string(),
            price: 1.5,
        }
    }

    fn sample() -> AlbumCollection {
        AlbumCollection::new(vec![album("1", "A"), album("2", "B"), album("3", "C")])
    }

    #[test]
    fn find_returns_none_for_unknown_id() {
        let albums = sample();
        assert_eq!(albums.find("2").map(|a| a.title.as_str()), Some("B"));
        assert!(albums.find("9").is_none());
    }

    #[test]
    fn empty_id_is_a_regular_key() {
        let albums = AlbumCollection::new(vec![album("", "Untitled")]);
        assert_eq!(albums.find("").map(|a| a.title.as_str()), Some("Untitled"));
    }

    #[test]
    fn insert_appends_and_rejects_duplicates() {
        let mut albums = sample();
        albums.insert(album("4", "D")).unwrap();
        assert_eq!(albums.len(), 4);
        assert_eq!(albums.as_slice()[3].id, "4");

        let err = albums.insert(album("1", "Other")).unwrap_err();
        assert_eq!(err, AlbumError::Conflict("1".to_string()));
        assert_eq!(albums.len(), 4);
        assert_eq!(albums.find("1").unwrap().title, "A");
    }

    #[test]
    fn replace_keeps_position() {
        let mut albums = sample();
        let replaced = albums.replace("2", album("2", "B2")).unwrap();
        assert_eq!(replaced.title, "B2");
        assert_eq!(albums.position("2"), Some(1));
        assert_eq!(albums.len(), 3);
    }

    #[test]
    fn replace_reports_not_found_before_mismatch() {
        let mut albums = sample();
        let before = albums.clone();

        assert_eq!(
            albums.replace("9", album("8", "Z")).unwrap_err(),
            AlbumError::NotFound("9".to_string())
        );
        assert_eq!(
            albums.replace("2", album("8", "Z")).unwrap_err(),
            AlbumError::IdMismatch {
                path_id: "2".to_string(),
                body_id: "8".to_string(),
            }
        );
        assert_eq!(albums, before);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut albums = sample();
        let removed = albums.remove("2").unwrap();
        assert_eq!(removed.title, "B");
        let ids: Vec<&str> = albums.as_slice().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert_eq!(
            albums.remove("2").unwrap_err(),
            AlbumError::NotFound("2".to_string())
        );
    }

    #[test]
    fn serializes_as_bare_array() {
        let albums = AlbumCollection::new(vec![album("1", "A")]);
        let json = serde_json::to_value(&albums).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "1");
    }
}
