//! The one place where domain errors become HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ua_domain::error::Error;

pub const NO_TOKEN: &str = "No token provided";
pub const TOKEN_EXPIRED: &str = "Token expired";
pub const INVALID_TOKEN: &str = "Invalid token";
pub const INTERNAL: &str = "Something went wrong!";

/// Error returned by handlers; renders as `{ "success": false, "error": .. }`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::InvalidInput(msg) => api_error(StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => api_error(StatusCode::UNAUTHORIZED, msg),
            Error::TokenExpired => api_error(StatusCode::UNAUTHORIZED, TOKEN_EXPIRED),
            Error::InvalidToken(detail) => {
                tracing::debug!(detail = %detail, "rejected bearer token");
                api_error(StatusCode::UNAUTHORIZED, INVALID_TOKEN)
            }
            Error::NotFound(msg) => api_error(StatusCode::NOT_FOUND, msg),
            other => {
                tracing::error!(error = %other, "request failed");
                api_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
            }
        }
    }
}

pub fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "success": false, "error": message.into() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (Error::InvalidInput("Email is required".into()), StatusCode::BAD_REQUEST),
            (Error::Unauthorized(NO_TOKEN.into()), StatusCode::UNAUTHORIZED),
            (Error::TokenExpired, StatusCode::UNAUTHORIZED),
            (Error::InvalidToken("bad sig".into()), StatusCode::UNAUTHORIZED),
            (Error::NotFound("Agent not found".into()), StatusCode::NOT_FOUND),
            (Error::IdentityProvider("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Catalog("broken".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).into_response().status(), status);
        }
    }
}
