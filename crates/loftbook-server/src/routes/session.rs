//! Authentication and session-status endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::error::AppError;
use crate::types::OkResponse;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
struct AuthRequest {
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminStatus {
    is_admin: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth", post(authenticate))
        .route("/logout", post(logout))
        .route("/admin", get(admin_status))
}

/// Validate the shared passcode and issue the session cookie.
///
/// Direct string equality against the configured secret; no hashing, no
/// rate limiting, no lockout.
async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<OkResponse>), AppError> {
    let Some(secret) = state.admin_password.as_deref() else {
        return Err(AppError::Internal(
            "ADMIN_PASSWORD is not configured".to_string(),
        ));
    };

    // A malformed body is an empty candidate, not a bad request.
    let candidate = payload.map(|Json(req)| req.password).unwrap_or_default();

    if candidate.is_empty() || candidate != secret {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    Ok((jar.add(auth::session_cookie()), Json(OkResponse::ok())))
}

/// Expire the session cookie unconditionally.
async fn logout(jar: CookieJar) -> (CookieJar, Json<OkResponse>) {
    (jar.add(auth::expired_cookie()), Json(OkResponse::ok()))
}

/// Report whether the request carries an admin session.
async fn admin_status(jar: CookieJar) -> Json<AdminStatus> {
    Json(AdminStatus {
        is_admin: auth::is_admin(&jar),
    })
}
