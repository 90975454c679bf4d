//! Authenticated user extractor.
//!
//! Validates the bearer token from the identity provider and resolves
//! it to a profile row, creating one on first login.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::ProfileRepository;

/// The authenticated user's profile, resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub profile_id: Uuid,
    pub username: String,
    pub display_name: String,
}

/// Pull the bearer token out of the Authorization header.
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = state
            .jwt_verifier
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        // Resolve the provider subject to a profile row. First login
        // creates the row; the repository absorbs the insert race.
        let repo = ProfileRepository::new(state.pool.clone());
        let profile = repo
            .get_or_create(
                &claims.sub,
                &claims.username,
                &claims.name,
                claims.avatar_url.as_deref(),
            )
            .await?;

        Ok(UserAuth {
            profile_id: profile.id,
            username: profile.username,
            display_name: profile.display_name,
        })
    }
}
