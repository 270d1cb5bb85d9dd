//! Skills document endpoints
//!
//! The read is public; the write requires the admin session and always
//! replaces the whole document.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;

use loftbook_core::rows::SkillRow;

use crate::auth;
use crate::error::AppError;
use crate::types::OkResponse;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/skills", get(list_skills).post(save_skills))
}

/// Read the shared skills document. Missing data is an empty array,
/// never an error.
async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<SkillRow>>, AppError> {
    let rows = state.store.load()?;
    Ok(Json(rows))
}

/// Replace the shared skills document.
///
/// The admin check runs before the body is even looked at, so a bad
/// payload without a session still reads as 401.
async fn save_skills(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<OkResponse>, AppError> {
    if !auth::is_admin(&jar) {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    let body = payload
        .map(|Json(value)| value)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let Value::Array(items) = body else {
        return Err(AppError::BadRequest("Expected an array".to_string()));
    };

    let rows: Vec<SkillRow> = serde_json::from_value(Value::Array(items))?;
    state.store.save(&rows)?;

    Ok(Json(OkResponse::ok()))
}
