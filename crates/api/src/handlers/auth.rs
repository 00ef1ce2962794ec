//! Handlers for the `/auth` resource (register, refresh, identify).
//!
//! Handlers are thin: they move credentials between the wire and
//! [`AuthService`], which owns the flow logic and the error
//! classification.
//!
//! [`AuthService`]: crate::auth::service::AuthService

use axum::extract::State;
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use axum::Json;

use crate::auth::service::{IssuedToken, RefreshedToken, RegisterInput, UserProfile};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiSuccess;
use crate::state::AppState;

/// Cookie carrying the refresh credential.
const REFRESH_COOKIE: &str = "refresh_token";

/// POST /api/v1/auth/register
///
/// Create an account and return its first token.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<Json<ApiSuccess<IssuedToken>>> {
    let issued = state.auth.register(input).await?;
    Ok(Json(ApiSuccess {
        message: "Registered successfully",
        data: issued,
    }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange the cookie-borne refresh credential for a fresh access token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiSuccess<RefreshedToken>>> {
    let credential = cookie_value(&headers, REFRESH_COOKIE);
    let refreshed = state.auth.refresh(credential.as_deref()).await?;
    Ok(Json(ApiSuccess {
        message: "Refresh token successful",
        data: refreshed,
    }))
}

/// GET /api/v1/auth/me
///
/// Project the authenticated user's public identity.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiSuccess<UserProfile>>> {
    let profile = state.auth.identify(user.user_id).await?;
    Ok(Json(ApiSuccess {
        message: "Request successful",
        data: profile,
    }))
}

/// Extract a named cookie value from the `Cookie` header, if present.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
