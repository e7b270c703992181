use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use tracing::warn;

use crate::auth::claims::Claims;
use crate::auth::jwt::JwtKeys;
use crate::response::ApiError;

/// Extracts and verifies the bearer token, handing the decoded claims to
/// the handler. Rejections render the standard envelope.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        // The header must be present before anything inspects it.
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(no_token)?;

        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        if token.is_empty() {
            return Err(no_token());
        }

        match keys.verify(token) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(_) => {
                warn!("token verification failed");
                Err(ApiError::error(StatusCode::BAD_REQUEST, "Invalid token."))
            }
        }
    }
}

fn no_token() -> ApiError {
    ApiError::error(
        StatusCode::UNAUTHORIZED,
        "Access denied. No token provided.",
    )
}
