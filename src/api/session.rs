//! Admin login and logout endpoints.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::session::Session;
use crate::AppState;

/// Request body for an admin login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/session - Log in and receive a session id.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Session> {
    let session = state
        .sessions
        .login(&request.username, &request.password)
        .await?;
    success(session)
}

/// DELETE /api/session - Close the caller's session.
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<()> {
    state.sessions.logout(&session).await;
    success(())
}
