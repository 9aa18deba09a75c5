use crate::domain::album::Album;
use crate::transport::http::handlers::albums;
use crate::transport::http::types::{
    AlbumData, AlbumResponse, AlbumsData, AlbumsResponse, AppState, ErrorResponse,
};
use axum::extract::DefaultBodyLimit;
use axum::routing::any;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        albums::list_albums,
        albums::create_album,
        albums::get_album,
        albums::replace_album,
        albums::delete_album
    ),
    components(schemas(
        Album,
        AlbumData,
        AlbumsData,
        AlbumResponse,
        AlbumsResponse,
        ErrorResponse
    ))
)]
pub struct ApiDoc;

/// Album routes only. Every path outside `/albums` falls through to a plain-text 404.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/albums", any(albums::collection_handler))
        // `/albums/*rest` does not match an empty tail.
        .route("/albums/", any(albums::item_handler))
        .route("/albums/*rest", any(albums::item_handler))
        .fallback(albums::not_found_handler)
        // Album bodies have no size limit.
        .layer(DefaultBodyLimit::disable())
        .with_state(app_state)
}

/// The served application: routes plus request tracing, and Swagger UI when enabled.
///
/// No CORS layer: preflight `OPTIONS` requests must reach the routes and get their 404/405.
pub fn build_app(app_state: AppState, swagger_ui: bool) -> Router {
    let mut app = create_router(app_state);
    if swagger_ui {
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }
    app.layer(TraceLayer::new_for_http())
}
