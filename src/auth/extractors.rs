use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tracing::{error, warn};

use crate::auth::repo_types::AuthToken;
use crate::state::AppState;

/// Resolves the `Authorization: Token <key>` header to the acting user id.
pub struct AuthUser(pub i64);

fn token_from_header(value: &str) -> Option<&str> {
    value
        .strip_prefix("Token ")
        .or_else(|| value.strip_prefix("token "))
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "missing Authorization header".to_string(),
            ))?;

        // Expect "Token <key>"
        let key = token_from_header(auth).ok_or((
            StatusCode::UNAUTHORIZED,
            "invalid auth scheme".to_string(),
        ))?;

        let token = AuthToken::find_by_key(&state.db, key).await.map_err(|e| {
            error!(error = %e, "token lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

        match token {
            Some(t) => Ok(AuthUser(t.user_id)),
            None => {
                warn!("unknown token");
                Err((StatusCode::UNAUTHORIZED, "invalid token".to_string()))
            }
        }
    }
}
