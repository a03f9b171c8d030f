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
        .route("/cinema-halls", get(handler::list_cinema_halls))
        .route("/cinema-halls/{id}", get(handler::get_cinema_hall));

    let write_routes = Router::new()
        .route("/cinema-halls", post(handler::create_cinema_hall))
        .route("/cinema-halls/{id}", axum::routing::put(handler::update_cinema_hall).delete(handler::delete_cinema_hall))
        .route_layer(middleware::from_fn(crate::middleware::role::admin_guard));

    read_routes
        .merge(write_routes)
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
