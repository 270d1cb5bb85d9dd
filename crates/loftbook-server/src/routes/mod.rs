//! API routes

use axum::Router;

use crate::AppState;

mod session;
mod skills;

/// Build the API router with all endpoints
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(session::router())
        .merge(skills::router())
}
