use super::dto::{
    CreateMovieSessionRequest, MovieSessionDetailResponse, MovieSessionListResponse, SessionQuery,
    UpdateMovieSessionRequest,
};
use super::service::MovieSessionService;
use crate::common::extract::{JsonBody, QueryParams};
use crate::common::pagination::{PageParams, Paginated};
use crate::common::response::{ApiSuccess, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// List movie sessions
#[utoipa::path(
    get,
    path = "/api/v1/movie-sessions",
    params(SessionQuery, PageParams),
    responses(
        (status = 200, description = "Page of sessions", body = Paginated<MovieSessionListResponse>),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
pub async fn list_movie_sessions(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SessionQuery>,
    QueryParams(page): QueryParams<PageParams>,
) -> impl IntoResponse {
    match MovieSessionService::find_all(state, query, page).await {
        Ok(sessions) => ApiSuccess(sessions, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Schedule a movie session
#[utoipa::path(
    post,
    path = "/api/v1/movie-sessions",
    request_body = CreateMovieSessionRequest,
    responses(
        (status = 201, description = "Session created", body = MovieSessionDetailResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
pub async fn create_movie_session(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateMovieSessionRequest>,
) -> impl IntoResponse {
    match MovieSessionService::create(state, payload).await {
        Ok(session) => ApiSuccess(session, StatusCode::CREATED).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get movie session by ID
#[utoipa::path(
    get,
    path = "/api/v1/movie-sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie session ID")
    ),
    responses(
        (status = 200, description = "Session details", body = MovieSessionDetailResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
pub async fn get_movie_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match MovieSessionService::find_by_id(state, id).await {
        Ok(session) => ApiSuccess(session, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update movie session
#[utoipa::path(
    put,
    path = "/api/v1/movie-sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie session ID")
    ),
    request_body = UpdateMovieSessionRequest,
    responses(
        (status = 200, description = "Session updated", body = MovieSessionDetailResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
pub async fn update_movie_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateMovieSessionRequest>,
) -> impl IntoResponse {
    match MovieSessionService::update(state, id, payload).await {
        Ok(session) => ApiSuccess(session, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete movie session
#[utoipa::path(
    delete,
    path = "/api/v1/movie-sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie session ID")
    ),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
pub async fn delete_movie_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match MovieSessionService::delete(state, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
