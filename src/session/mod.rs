//! Admin session gate.
//!
//! A login compares the supplied pair against the configured credentials and,
//! on success, opens a [`Session`]. Sessions live only in this process: a restart
//! or a logout closes them. This is a UI gate, not a security boundary; there is
//! no lockout and no attempt counting.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

use crate::errors::AppError;

/// Header carrying the session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Message shown on a failed login.
pub const AUTH_FAILED_MESSAGE: &str = "Invalid username or password";

/// Expected admin login pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated admin session, passed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub username: String,
}

/// Issues, resolves and closes admin sessions.
pub struct SessionGate {
    expected: Option<Credentials>,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionGate {
    pub fn new(expected: Option<Credentials>) -> Self {
        Self {
            expected,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session when the pair matches the configured credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let Some(expected) = &self.expected else {
            tracing::warn!("Login attempted but no admin credentials are configured");
            return Err(AppError::AuthFailed(AUTH_FAILED_MESSAGE.to_string()));
        };

        // Evaluate both halves so the comparison does not short-circuit.
        let username_ok = constant_time_compare(username, &expected.username);
        let password_ok = constant_time_compare(password, &expected.password);
        if !(username_ok & password_ok) {
            tracing::info!("Rejected admin login for {:?}", username);
            return Err(AppError::AuthFailed(AUTH_FAILED_MESSAGE.to_string()));
        }

        let session = Session {
            session_id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
        };
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());

        tracing::info!("Admin {} logged in", session.username);
        Ok(session)
    }

    /// Look up an open session by id.
    pub async fn resolve(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Close a session. Returns whether it was open.
    pub async fn logout(&self, session: &Session) -> bool {
        let removed = self
            .sessions
            .write()
            .await
            .remove(&session.session_id)
            .is_some();
        if removed {
            tracing::info!("Admin {} logged out", session.username);
        }
        removed
    }
}

/// Middleware admitting only requests that carry an open session id.
///
/// The resolved [`Session`] is added to the request extensions for handlers.
pub async fn session_layer(gate: Arc<SessionGate>, mut request: Request, next: Next) -> Response {
    let provided = request
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
        .map(|s| s.to_string());

    let Some(session_id) = provided else {
        return AppError::Unauthorized("Login required".to_string()).into_response();
    };

    match gate.resolve(&session_id).await {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => AppError::Unauthorized("Session expired or invalid".to_string()).into_response(),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
