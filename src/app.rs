use crate::state::AppState;
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Fully wired application: API, docs and media, with request tracing on top.
pub fn create_app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    crate::routes::configure_routes(state.clone())
        .layer(trace)
        .with_state(state)
}
