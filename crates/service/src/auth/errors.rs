use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid credentials")]
    Unauthorized,
    #[error("access token required")]
    MissingToken,
    #[error("invalid or expired token: {0}")]
    InvalidToken(String),
    #[error("admin role required")]
    Forbidden,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Unauthorized => 1004,
            AuthError::MissingToken => 1005,
            AuthError::InvalidToken(_) => 1006,
            AuthError::Forbidden => 1007,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
        }
    }
}
