use super::dto::TokenClaims;
use super::model::UserRole;
use anyhow::{anyhow, Result};
use jsonwebtoken::{
    decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

pub const ACCESS_TOKEN_TTL_SECS: u64 = 15 * 60;

pub struct AuthService;

impl AuthService {
    pub fn create_access_token(
        user_id: Uuid,
        role: UserRole,
        secret: &str,
        ttl_secs: u64,
    ) -> Result<String> {
        let now = get_current_timestamp();

        let claims = TokenClaims {
            sub: user_id,
            role,
            exp: (now + ttl_secs) as usize,
            iat: now as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| anyhow!(e.to_string()))
    }

    pub fn verify_access_token(token: &str, secret: &str) -> Result<TokenClaims> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| anyhow!("Invalid token: {}", e))?;

        Ok(data.claims)
    }
}
