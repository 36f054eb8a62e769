//! Error types shared between the backend and its clients

use thiserror::Error;

/// Authentication error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Malformed token")]
    TokenMalformed,

    #[error("Authorization header is required")]
    MissingToken,

    #[error("Authorization header must be of the form 'Bearer <token>'")]
    MalformedHeader,
}
