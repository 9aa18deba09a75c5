use crate::app::album_service::ServiceError;
use crate::domain::album::AlbumError;
use crate::transport::http::types::{ApiError, AppState};
use tracing::{error, warn};

/// Maps a service failure to the error the client sees.
///
/// Storage failures are logged; with `fatal_storage_errors` set they also
/// terminate the process.
pub fn service_error(state: &AppState, err: ServiceError) -> ApiError {
    match err {
        ServiceError::Album(AlbumError::MalformedBody(reason)) => {
            warn!(%reason, "invalid payload for album");
            ApiError::BadRequest
        }
        ServiceError::Album(AlbumError::NotFound(_))
        | ServiceError::Album(AlbumError::IdMismatch { .. }) => ApiError::AlbumNotFound,
        ServiceError::Album(AlbumError::Conflict(_)) => ApiError::Conflict,
        ServiceError::Storage(e) => {
            error!(error = %e, "album storage failure");
            if state.fatal_storage_errors {
                error!("fatal storage errors enabled, shutting down");
                std::process::exit(1);
            }
            ApiError::Internal
        }
    }
}

/// Extracts the album id from a request path.
///
/// The path is percent-decoded and split on `/`; only `/albums/{id}` (exactly
/// three segments) yields an id. Trailing slashes and deeper nesting do not.
/// Escapes that are not UTF-8 become U+FFFD rather than failing the request.
pub fn album_id_from_path(path: &str) -> Option<String> {
    let bytes = urlencoding::decode_binary(path.as_bytes());
    let decoded = String::from_utf8_lossy(&bytes);
    let parts: Vec<&str> = decoded.split('/').collect();
    match parts.as_slice() {
        ["", "albums", id] => Some((*id).to_string()),
        _ => None,
    }
}
