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
        .route("/movie-sessions", get(handler::list_movie_sessions))
        .route("/movie-sessions/{id}", get(handler::get_movie_session));

    let write_routes = Router::new()
        .route("/movie-sessions", post(handler::create_movie_session))
        .route(
            "/movie-sessions/{id}",
            axum::routing::put(handler::update_movie_session).delete(handler::delete_movie_session),
        )
        .route_layer(middleware::from_fn(crate::middleware::role::admin_guard));

    read_routes
        .merge(write_routes)
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
