use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

/// Headroom for multipart boundaries and part headers around the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router(state: AppState) -> axum::Router<AppState> {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    let read_routes = Router::new()
        .route("/movies", get(handler::list_movies))
        .route("/movies/{id}", get(handler::get_movie));

    let write_routes = Router::new()
        .route("/movies", post(handler::create_movie))
        .route("/movies/{id}", axum::routing::put(handler::update_movie).delete(handler::delete_movie))
        .route(
            "/movies/{id}/upload-image",
            post(handler::upload_movie_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/movies/{id}/image", delete(handler::delete_movie_image))
        .route_layer(middleware::from_fn(crate::middleware::role::admin_guard));

    read_routes
        .merge(write_routes)
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
