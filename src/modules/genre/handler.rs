use super::dto::{CreateGenreRequest, GenreResponse, UpdateGenreRequest};
use super::service::GenreService;
use crate::common::extract::JsonBody;
use crate::common::response::{ApiSuccess, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// List all genres
#[utoipa::path(
    get,
    path = "/api/v1/genres",
    responses(
        (status = 200, description = "List of genres", body = Vec<GenreResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn list_genres(State(state): State<AppState>) -> impl IntoResponse {
    match GenreService::find_all(state).await {
        Ok(genres) => ApiSuccess(genres, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/api/v1/genres",
    request_body = CreateGenreRequest,
    responses(
        (status = 201, description = "Genre created", body = GenreResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn create_genre(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateGenreRequest>,
) -> impl IntoResponse {
    match GenreService::create(state, payload).await {
        Ok(genre) => ApiSuccess(genre, StatusCode::CREATED).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre details", body = GenreResponse),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match GenreService::find_by_id(state, id).await {
        Ok(genre) => ApiSuccess(genre, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update genre
#[utoipa::path(
    put,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    request_body = UpdateGenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = GenreResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 404, description = "Genre not found", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateGenreRequest>,
) -> impl IntoResponse {
    match GenreService::update(state, id, payload).await {
        Ok(genre) => ApiSuccess(genre, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete genre
#[utoipa::path(
    delete,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match GenreService::delete(state, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
