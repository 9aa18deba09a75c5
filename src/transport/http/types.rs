use crate::app::album_service::AlbumService;
use crate::domain::album::Album;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub album_service: Arc<AlbumService>,
    /// Exit the process on storage failures, as the original deployment did.
    pub fatal_storage_errors: bool,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AlbumData {
    pub album: Album,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AlbumsData {
    pub albums: Vec<Album>,
}

/// `{"data":{"album":{...}},"ok":true}`
#[derive(Serialize, Debug, ToSchema)]
pub struct AlbumResponse {
    pub data: AlbumData,
    pub ok: bool,
}

impl AlbumResponse {
    pub fn new(album: Album) -> Self {
        Self {
            data: AlbumData { album },
            ok: true,
        }
    }
}

/// `{"data":{"albums":[...]},"ok":true}`
#[derive(Serialize, Debug, ToSchema)]
pub struct AlbumsResponse {
    pub data: AlbumsData,
    pub ok: bool,
}

impl AlbumsResponse {
    pub fn new(albums: Vec<Album>) -> Self {
        Self {
            data: AlbumsData { albums },
            ok: true,
        }
    }
}

/// `{"message":"...","ok":false}`
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub ok: bool,
}

/// Every failure a request can end in. The `Display` text is the client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Bad Request")]
    BadRequest,

    /// Path under `/albums/` with the wrong number of segments.
    #[error("Not Found")]
    NotFound,

    /// Unknown id, or a replace body whose id differs from the path.
    #[error("Album Not Found")]
    AlbumNotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Conflict - Album already exists")]
    Conflict,

    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::AlbumNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            message: err.to_string(),
            ok: false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::from(self))).into_response()
    }
}
