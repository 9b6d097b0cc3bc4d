//! Error types for the wiki

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Unknown user, missing password hash or wrong password.
    /// Deliberately carries no detail about which one.
    #[error("Authentication failed")]
    AuthFailure,

    #[error("Page '{0}' not found")]
    PageNotFound(String),

    #[error("Page '{0}' already exists")]
    PageAlreadyExists(String),

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Config file not found. Run 'wiki init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::PageNotFound(name) => {
                tracing::debug!("Page not found: {}", name);
                (
                    StatusCode::NOT_FOUND,
                    Html("<h1>404 Not Found</h1><p>The page you requested does not exist.</p>"),
                )
                    .into_response()
            }
            other => {
                tracing::error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>500 Internal Server Error</h1>"),
                )
                    .into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
