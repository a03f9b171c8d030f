use crate::common::error::AppError;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::debug;

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract bearer token
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::Unauthorized("Missing or invalid token"))?;

    // 2. Verify JWT
    let claims = AuthService::verify_access_token(bearer.token(), &state.config.jwt_secret)
        .map_err(|e| {
            debug!("Rejected bearer token: {}", e);
            AppError::Unauthorized("Invalid token signature")
        })?;

    // 3. Inject claims into request extensions
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
