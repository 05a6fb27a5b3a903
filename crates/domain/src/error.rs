/// Shared error type used across all Unity AI crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    /// Malformed or missing request input (400).
    #[error("{0}")]
    InvalidInput(String),

    /// No credential was presented (401).
    #[error("{0}")]
    Unauthorized(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Unknown group, unknown agent id, or an empty result set (404).
    #[error("{0}")]
    NotFound(String),

    #[error("catalog: {0}")]
    Catalog(String),

    #[error("config: {0}")]
    Config(String),

    #[error("identity provider: {0}")]
    IdentityProvider(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
