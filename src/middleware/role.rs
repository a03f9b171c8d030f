use crate::common::error::AppError;
use crate::modules::auth::dto::TokenClaims;
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

pub async fn admin_guard(
    Extension(claims): Extension<TokenClaims>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !claims.is_admin() {
        warn!(
            "User {} denied {} {}",
            claims.sub,
            req.method(),
            req.uri().path()
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}
