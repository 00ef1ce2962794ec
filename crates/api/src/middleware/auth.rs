//! Bearer-token authentication extractor for axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use keygate_core::error::CoreError;
use keygate_core::types::DbId;

use crate::auth::service::token_fault;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// This is the upstream gate for the identify flow: it verifies the token
/// and attaches the resolved user id before the handler runs. Use it as an
/// extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        // Token failures keep their taxonomy kinds here: an expired token
        // stays distinguishable from a malformed or not-yet-valid one.
        let claims = state
            .auth
            .tokens()
            .verify(token)
            .map_err(|e| AppError::Core(token_fault(e)))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
