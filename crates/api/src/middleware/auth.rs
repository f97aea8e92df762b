//! Access-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use govai_core::error::CoreError;
use govai_core::roles::{ROLE_ADMIN, ROLE_REVIEWER};
use govai_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Cookie the web app stores the access token in.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Authenticated caller.
///
/// The token is read from `Authorization: Bearer <token>` and, failing that,
/// from the [`ACCESS_TOKEN_COOKIE`] cookie.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub email: String,
    pub role: String,
    /// Access token expiry (UTC Unix timestamp).
    pub expires_at: i64,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Reviewers and admins see every project's media.
    pub fn can_review(&self) -> bool {
        self.role == ROLE_ADMIN || self.role == ROLE_REVIEWER
    }

    /// Owner filter for media listings: `None` for reviewers and admins.
    pub fn media_owner_scope(&self) -> Option<DbId> {
        (!self.can_review()).then_some(self.user_id)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| {
                CookieJar::from_headers(&parts.headers)
                    .get(ACCESS_TOKEN_COOKIE)
                    .map(|c| c.value().to_string())
            })
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing access token".into()))
            })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            expires_at: claims.exp,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
