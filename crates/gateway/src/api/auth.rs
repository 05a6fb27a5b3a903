//! Login, token verification, and the session middleware guarding `/api`.
//!
//! Sessions are stateless: the bearer token carries the resolved identity
//! and nothing is stored server-side. Logout therefore only acknowledges;
//! a token stays valid until it expires.

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;
use ua_domain::error::Error;
use ua_sessions::identity::{EMAIL_REQUIRED, INVALID_EMAIL_FORMAT};

use super::error::{ApiError, NO_TOKEN};
use crate::state::AppState;

/// Login body. `email` stays untyped so a non-string value is reported
/// as a bad format instead of a missing field.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<serde_json::Value>,
}

impl LoginRequest {
    fn email(&self) -> Result<&str, Error> {
        match &self.email {
            None | Some(serde_json::Value::Null) => Err(Error::InvalidInput(EMAIL_REQUIRED.into())),
            Some(serde_json::Value::String(s)) if s.is_empty() => {
                Err(Error::InvalidInput(EMAIL_REQUIRED.into()))
            }
            Some(serde_json::Value::String(s)) => Ok(s),
            Some(_) => Err(Error::InvalidInput(INVALID_EMAIL_FORMAT.into())),
        }
    }
}

/// `Authorization: Bearer <token>` value, if present and non-empty.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /auth/login
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // An unreadable body counts as a missing email.
    let Json(req) = body.map_err(|_| Error::InvalidInput(EMAIL_REQUIRED.into()))?;
    let email = req.email()?;

    let identity = state.identity.resolve(email).await?;
    let issued = state.tokens.issue(&identity)?;
    tracing::info!(email = %identity.email, team = %identity.team, "login");

    Ok(Json(serde_json::json!({
        "success": true,
        "token": issued.token,
        "user": {
            "id": identity.id,
            "email": identity.email,
            "name": identity.display_name,
            "company": state.config.auth.company,
        },
        "team": identity.team,
        "isAdmin": identity.is_admin,
    })))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /auth/verify
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = bearer_token(&headers).ok_or_else(|| Error::Unauthorized(NO_TOKEN.into()))?;
    let claims = state.tokens.verify_claims(token)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "user": {
            "id": claims.sub,
            "email": claims.email,
            "name": claims.name,
            "company": state.config.auth.company,
            "team": claims.team,
            "isAdmin": claims.is_admin,
            "iat": claims.iat,
            "exp": claims.exp,
        },
    })))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /auth/logout, GET /auth/callback
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn logout() -> impl IntoResponse {
    tracing::info!("logout");
    Json(serde_json::json!({
        "success": true,
        "message": "Logged out successfully",
    }))
}

/// SSO return URL. There is no SSO exchange yet; send the browser on to
/// the dashboard.
pub async fn callback(State(state): State<AppState>) -> Redirect {
    let base = state.config.server.frontend_url.trim_end_matches('/');
    Redirect::to(&format!("{base}/dashboard"))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Middleware
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Axum middleware that requires a valid session token and makes the
/// caller's [`Identity`](ua_domain::identity::Identity) available as a
/// request extension. Attach via `axum::middleware::from_fn_with_state`.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let verified = match bearer_token(req.headers()) {
        Some(token) => state.tokens.verify(token),
        None => Err(Error::Unauthorized(NO_TOKEN.into())),
    };

    match verified {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(e) => ApiError(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), None);
    }
}
