use axum::Router;
use axum::routing::{get, post};
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    let read_routes = Router::new()
        .route("/genres", get(handler::list_genres))
        .route("/genres/{id}", get(handler::get_genre));

    let write_routes = Router::new()
        .route("/genres", post(handler::create_genre))
        .route("/genres/{id}", axum::routing::put(handler::update_genre).delete(handler::delete_genre))
        .route_layer(middleware::from_fn(crate::middleware::role::admin_guard));

    read_routes
        .merge(write_routes)
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
