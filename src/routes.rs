use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::config::settings::StorageBackend;
use crate::docs::ApiDoc;
use axum::Router;
use crate::state::AppState;

use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

pub fn configure_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api_routes(state.clone()));

    media_routes(router, &state).layer(cors)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
        .merge(crate::modules::auth::router(state.clone()))
        .merge(crate::modules::genre::router(state.clone()))
        .merge(crate::modules::actor::router(state.clone()))
        .merge(crate::modules::cinema_hall::router(state.clone()))
        .merge(crate::modules::movie::router(state.clone()))
        .merge(crate::modules::movie_session::router(state))
}

/// Serves locally stored images when they live under a path of this server.
fn media_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let config = &state.config;
    let prefix = config.media_url.trim_end_matches('/');

    if config.storage_backend != StorageBackend::Local || !prefix.starts_with('/') || prefix.is_empty() {
        return router;
    }

    router.nest_service(prefix, ServeDir::new(&config.media_root))
}
