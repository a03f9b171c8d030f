use super::dto::{CurrentUserResponse, TokenClaims};
use crate::common::response::ApiSuccess;
use axum::{extract::Extension, http::StatusCode, response::IntoResponse};

/// Identity of the caller
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn get_me(Extension(claims): Extension<TokenClaims>) -> impl IntoResponse {
    ApiSuccess(CurrentUserResponse::from(&claims), StatusCode::OK)
}
