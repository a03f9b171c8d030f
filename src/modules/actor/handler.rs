use super::dto::{ActorResponse, CreateActorRequest, UpdateActorRequest};
use super::service::ActorService;
use crate::common::extract::JsonBody;
use crate::common::response::{ApiSuccess, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// List all actors
#[utoipa::path(
    get,
    path = "/api/v1/actors",
    responses(
        (status = 200, description = "List of actors", body = Vec<ActorResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn list_actors(State(state): State<AppState>) -> impl IntoResponse {
    match ActorService::find_all(state).await {
        Ok(actors) => ApiSuccess(actors, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new actor
#[utoipa::path(
    post,
    path = "/api/v1/actors",
    request_body = CreateActorRequest,
    responses(
        (status = 201, description = "Actor created", body = ActorResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn create_actor(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateActorRequest>,
) -> impl IntoResponse {
    match ActorService::create(state, payload).await {
        Ok(actor) => ApiSuccess(actor, StatusCode::CREATED).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get actor by ID
#[utoipa::path(
    get,
    path = "/api/v1/actors/{id}",
    params(("id" = Uuid, Path, description = "Actor ID")),
    responses(
        (status = 200, description = "Actor details", body = ActorResponse),
        (status = 404, description = "Actor not found", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn get_actor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match ActorService::find_by_id(state, id).await {
        Ok(actor) => ApiSuccess(actor, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update actor
#[utoipa::path(
    put,
    path = "/api/v1/actors/{id}",
    params(("id" = Uuid, Path, description = "Actor ID")),
    request_body = UpdateActorRequest,
    responses(
        (status = 200, description = "Actor updated", body = ActorResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 404, description = "Actor not found", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn update_actor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateActorRequest>,
) -> impl IntoResponse {
    match ActorService::update(state, id, payload).await {
        Ok(actor) => ApiSuccess(actor, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete actor
#[utoipa::path(
    delete,
    path = "/api/v1/actors/{id}",
    params(("id" = Uuid, Path, description = "Actor ID")),
    responses(
        (status = 204, description = "Actor deleted"),
        (status = 404, description = "Actor not found", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
pub async fn delete_actor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match ActorService::delete(state, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
