use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use async_trait::async_trait;
use rand::rngs::OsRng;

use super::domain::{AuthUser, Credentials, ADMIN_ROLE};
use super::errors::AuthError;

/// Repository abstraction for credential lookup.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credentials>, AuthError>;
}

/// Hash a plaintext password with Argon2id and a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// The single configured administrator. The plaintext password is hashed
/// once at construction and never kept.
pub struct StaticCredentialRepository {
    creds: Credentials,
}

impl StaticCredentialRepository {
    pub fn new(username: &str, password: &str) -> Result<Self, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Validation("admin username and password are required".into()));
        }
        let creds = Credentials {
            user: AuthUser { username: username.to_string(), role: ADMIN_ROLE.to_string() },
            password_hash: hash_password(password)?,
        };
        Ok(Self { creds })
    }
}

#[async_trait]
impl CredentialRepository for StaticCredentialRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
        Ok((self.creds.user.username == username).then(|| self.creds.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn only_configured_user_is_found() -> Result<(), AuthError> {
        let repo = StaticCredentialRepository::new("admin", "pw")?;
        let found = repo.find_by_username("admin").await?.expect("configured user");
        assert_eq!(found.user.role, ADMIN_ROLE);
        assert!(found.password_hash.starts_with("$argon2"));
        assert!(repo.find_by_username("Admin").await?.is_none());
        Ok(())
    }

    #[test]
    fn empty_credentials_rejected() {
        assert!(matches!(StaticCredentialRepository::new(" ", "pw"), Err(AuthError::Validation(_))));
        assert!(matches!(StaticCredentialRepository::new("admin", ""), Err(AuthError::Validation(_))));
    }
}
