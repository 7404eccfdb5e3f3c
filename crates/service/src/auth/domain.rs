use serde::{Deserialize, Serialize};

/// The only role the site knows about.
pub const ADMIN_ROLE: &str = "admin";

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Authenticated principal as returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
    pub role: String,
}

/// Stored credentials (hashed)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: AuthUser,
    pub password_hash: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: AuthUser,
    /// unix seconds
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user(&self) -> AuthUser {
        AuthUser { username: self.sub.clone(), role: self.role.clone() }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
