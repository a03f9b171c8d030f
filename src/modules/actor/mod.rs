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
        .route("/actors", get(handler::list_actors))
        .route("/actors/{id}", get(handler::get_actor));

    let write_routes = Router::new()
        .route("/actors", post(handler::create_actor))
        .route("/actors/{id}", axum::routing::put(handler::update_actor).delete(handler::delete_actor))
        .route_layer(middleware::from_fn(crate::middleware::role::admin_guard));

    read_routes
        .merge(write_routes)
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
