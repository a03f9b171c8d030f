use super::dto::{CinemaHallResponse, CreateCinemaHallRequest, UpdateCinemaHallRequest};
use super::service::CinemaHallService;
use crate::common::extract::JsonBody;
use crate::common::response::{ApiSuccess, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// List all cinema halls
#[utoipa::path(
    get,
    path = "/api/v1/cinema-halls",
    responses(
        (status = 200, description = "List of cinema halls", body = Vec<CinemaHallResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn list_cinema_halls(State(state): State<AppState>) -> impl IntoResponse {
    match CinemaHallService::find_all(state).await {
        Ok(halls) => ApiSuccess(halls, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new cinema hall
#[utoipa::path(
    post,
    path = "/api/v1/cinema-halls",
    request_body = CreateCinemaHallRequest,
    responses(
        (status = 201, description = "Cinema hall created", body = CinemaHallResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn create_cinema_hall(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateCinemaHallRequest>,
) -> impl IntoResponse {
    match CinemaHallService::create(state, payload).await {
        Ok(hall) => ApiSuccess(hall, StatusCode::CREATED).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get cinema hall by ID
#[utoipa::path(
    get,
    path = "/api/v1/cinema-halls/{id}",
    params(("id" = Uuid, Path, description = "Cinema hall ID")),
    responses(
        (status = 200, description = "Cinema hall details", body = CinemaHallResponse),
        (status = 404, description = "Cinema hall not found", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn get_cinema_hall(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match CinemaHallService::find_by_id(state, id).await {
        Ok(hall) => ApiSuccess(hall, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update cinema hall
#[utoipa::path(
    put,
    path = "/api/v1/cinema-halls/{id}",
    params(("id" = Uuid, Path, description = "Cinema hall ID")),
    request_body = UpdateCinemaHallRequest,
    responses(
        (status = 200, description = "Cinema hall updated", body = CinemaHallResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 404, description = "Cinema hall not found", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn update_cinema_hall(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateCinemaHallRequest>,
) -> impl IntoResponse {
    match CinemaHallService::update(state, id, payload).await {
        Ok(hall) => ApiSuccess(hall, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete cinema hall
#[utoipa::path(
    delete,
    path = "/api/v1/cinema-halls/{id}",
    params(("id" = Uuid, Path, description = "Cinema hall ID")),
    responses(
        (status = 204, description = "Cinema hall deleted"),
        (status = 400, description = "Cinema hall still hosts sessions", body = ErrorResponse),
        (status = 404, description = "Cinema hall not found", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn delete_cinema_hall(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match CinemaHallService::delete(state, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
