use super::model::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

impl TokenClaims {
    /// Write access to the catalog is reserved for administrators.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub role: UserRole,
}

impl From<&TokenClaims> for CurrentUserResponse {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}
