use crate::transport::http::handlers::common::{album_id_from_path, service_error};
use crate::transport::http::types::{AlbumResponse, AlbumsResponse, ApiError, AppState, ErrorResponse};
use crate::domain::album::Album;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// `/albums`: list on GET, create on POST.
pub async fn collection_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, ApiError> {
    match method {
        Method::GET => list_albums(&state).await,
        Method::POST => create_album(&state, &body).await,
        _ => Err(ApiError::MethodNotAllowed),
    }
}

/// `/albums/{id}`: fetch on GET, replace on PUT, remove on DELETE.
///
/// The path shape is checked before the method.
pub async fn item_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = album_id_from_path(uri.path()).ok_or(ApiError::NotFound)?;
    match method {
        Method::GET => get_album(&state, &id).await,
        Method::PUT => replace_album(&state, &id, &body).await,
        Method::DELETE => delete_album(&state, &id).await,
        _ => Err(ApiError::MethodNotAllowed),
    }
}

/// Anything outside `/albums`. The body is plain text under a JSON content type.
pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "application/json")],
        "Not Found",
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/albums",
    responses(
        (status = 200, description = "All albums", body = AlbumsResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_albums(state: &AppState) -> Result<Response, ApiError> {
    let albums = state
        .album_service
        .list()
        .await
        .map_err(|e| service_error(state, e))?;
    Ok((StatusCode::OK, Json(AlbumsResponse::new(albums.into_inner()))).into_response())
}

#[utoipa::path(
    post,
    path = "/albums",
    request_body = Album,
    responses(
        (status = 201, description = "Album created; returns the full collection", body = AlbumsResponse),
        (status = 400, description = "Body is not a valid album", body = ErrorResponse),
        (status = 409, description = "An album with this id already exists", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_album(state: &AppState, body: &[u8]) -> Result<Response, ApiError> {
    let albums = state
        .album_service
        .create(body)
        .await
        .map_err(|e| service_error(state, e))?;
    Ok((StatusCode::CREATED, Json(AlbumsResponse::new(albums.into_inner()))).into_response())
}

#[utoipa::path(
    get,
    path = "/albums/{id}",
    params(
        ("id" = String, Path, description = "Album id")
    ),
    responses(
        (status = 200, description = "The album", body = AlbumResponse),
        (status = 404, description = "Album not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_album(state: &AppState, id: &str) -> Result<Response, ApiError> {
    let album = state
        .album_service
        .get(id)
        .await
        .map_err(|e| service_error(state, e))?;
    Ok((StatusCode::OK, Json(AlbumResponse::new(album))).into_response())
}

#[utoipa::path(
    put,
    path = "/albums/{id}",
    params(
        ("id" = String, Path, description = "Album id; must equal the id in the body")
    ),
    request_body = Album,
    responses(
        (status = 200, description = "The replaced album", body = AlbumResponse),
        (status = 400, description = "Body is not a valid album", body = ErrorResponse),
        (status = 404, description = "Album not found, or body id differs from path id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn replace_album(state: &AppState, id: &str, body: &[u8]) -> Result<Response, ApiError> {
    let album = state
        .album_service
        .replace(id, body)
        .await
        .map_err(|e| service_error(state, e))?;
    Ok((StatusCode::OK, Json(AlbumResponse::new(album))).into_response())
}

#[utoipa::path(
    delete,
    path = "/albums/{id}",
    params(
        ("id" = String, Path, description = "Album id")
    ),
    responses(
        (status = 200, description = "Album removed; returns the remaining collection", body = AlbumsResponse),
        (status = 404, description = "Album not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_album(state: &AppState, id: &str) -> Result<Response, ApiError> {
    let albums = state
        .album_service
        .delete(id)
        .await
        .map_err(|e| service_error(state, e))?;
    Ok((StatusCode::OK, Json(AlbumsResponse::new(albums.into_inner()))).into_response())
}
