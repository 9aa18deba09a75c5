//! The album record and the collection it lives in.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use utoipa::ToSchema;

pub mod collection;

pub use collection::AlbumCollection;

/// A single album. `id` is supplied by the caller and is the only key.
///
/// Decoding is lenient: keys match case-insensitively, absent or `null`
/// fields keep their zero value, unknown fields are ignored and a `null`
/// document is the zero album. So `{"ID":"7","title":null}` is a valid album
/// with id `7`, an empty title and a price of 0.
#[derive(Serialize, Debug, Clone, PartialEq, Default, ToSchema)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

impl Album {
    /// Decodes the first JSON value found in a request body.
    ///
    /// Anything after that value is left unread.
    pub fn from_body(body: &[u8]) -> Result<Self, AlbumError> {
        let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<Album>();
        match stream.next() {
            Some(Ok(album)) => Ok(album),
            Some(Err(e)) => Err(AlbumError::MalformedBody(e.to_string())),
            None => Err(AlbumError::MalformedBody("empty body".to_string())),
        }
    }
}

/// Whole prices are written without a fractional part (`5`, not `5.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

enum Field {
    Id,
    Title,
    Artist,
    Price,
}

impl Field {
    fn matching(key: &str) -> Option<Self> {
        [
            ("id", Field::Id),
            ("title", Field::Title),
            ("artist", Field::Artist),
            ("price", Field::Price),
        ]
        .into_iter()
        .find(|(name, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, field)| field)
    }
}

struct AlbumVisitor;

impl<'de> Visitor<'de> for AlbumVisitor {
    type Value = Album;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an album object or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Album, E> {
        Ok(Album::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Album, E> {
        Ok(Album::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Album, D::Error> {
        deserializer.deserialize_map(self)
    }

    // Keys are applied in document order, so a repeated key keeps its last value.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Album, A::Error> {
        let mut album = Album::default();
        while let Some(key) = map.next_key::<String>()? {
            match Field::matching(&key) {
                Some(Field::Id) => {
                    if let Some(id) = map.next_value::<Option<String>>()? {
                        album.id = id;
                    }
                }
                Some(Field::Title) => {
                    if let Some(title) = map.next_value::<Option<String>>()? {
                        album.title = title;
                    }
                }
                Some(Field::Artist) => {
                    if let Some(artist) = map.next_value::<Option<String>>()? {
                        album.artist = artist;
                    }
                }
                Some(Field::Price) => {
                    if let Some(price) = map.next_value::<Option<f64>>()? {
                        album.price = price;
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(album)
    }
}

impl<'de> Deserialize<'de> for Album {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(AlbumVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlbumError {
    #[error("invalid album payload: {0}")]
    MalformedBody(String),

    #[error("album '{0}' not found")]
    NotFound(String),

    #[error("album '{0}' already exists")]
    Conflict(String),

    /// The body of a replace names a different album than the path.
    #[error("album id '{body_id}' does not match path id '{path_id}'")]
    IdMismatch { path_id: String, body_id: String },
}
