use std::sync::Arc;

use argon2::{password_hash::PasswordVerifier, Argon2, PasswordHash};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{info, instrument, warn};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::{CredentialRepository, StaticCredentialRepository};

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl: Duration::hours(ttl_hours) }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: CredentialRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

/// The service as wired by the server: one configured administrator.
pub type AdminAuthService = AuthService<StaticCredentialRepository>;

impl<R: CredentialRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Check a username/password pair and issue a signed session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService};
    /// use service::auth::domain::LoginInput;
    /// use service::auth::repository::StaticCredentialRepository;
    /// use std::sync::Arc;
    /// let repo = Arc::new(StaticCredentialRepository::new("admin", "Passw0rd").unwrap());
    /// let svc = AuthService::new(repo, AuthConfig::new("secret", 8));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "admin".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.role, "admin");
    /// assert!(svc.verify(&session.token).is_ok());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let Some(creds) = self.repo.find_by_username(&input.username).await? else {
            warn!("login rejected: unknown user");
            return Err(AuthError::Unauthorized);
        };

        let parsed = PasswordHash::new(&creds.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            warn!("login rejected: bad password");
            return Err(AuthError::Unauthorized);
        }

        let (token, claims) = self.issue_token(&creds.user)?;
        info!(username = %creds.user.username, exp = claims.exp, "admin_logged_in");
        Ok(AuthSession { token, user: creds.user, expires_at: claims.exp })
    }

    /// Sign a token for `user` valid for the configured TTL.
    pub fn issue_token(&self, user: &AuthUser) -> Result<(String, Claims), AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.username.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + self.cfg.token_ttl).timestamp(),
        };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok((token, claims))
    }

    /// Verify signature and expiry of a token.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let key = DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Gate for admin routes: a token must be present, valid and carry the
    /// admin role.
    pub fn authorize_admin(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let token = token.filter(|t| !t.trim().is_empty()).ok_or(AuthError::MissingToken)?;
        let claims = self.verify(token)?;
        if !claims.is_admin() {
            return Err(AuthError::Forbidden);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::ADMIN_ROLE;

    fn service() -> AdminAuthService {
        let repo = StaticCredentialRepository::new("eventninja12@", "9323641780").expect("repo");
        AuthService::new(Arc::new(repo), AuthConfig::new("test-secret", 8))
    }

    fn login(username: &str, password: &str) -> LoginInput {
        LoginInput { username: username.into(), password: password.into() }
    }

    #[tokio::test]
    async fn login_issues_eight_hour_token() -> Result<(), AuthError> {
        let svc = service();
        let session = svc.login(login("eventninja12@", "9323641780")).await?;
        assert_eq!(session.user, AuthUser { username: "eventninja12@".into(), role: ADMIN_ROLE.into() });

        let claims = svc.verify(&session.token)?;
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
        assert_eq!(claims.exp, session.expires_at);
        assert!(claims.is_admin());
        Ok(())
    }

    #[tokio::test]
    async fn wrong_credentials_are_unauthorized() {
        let svc = service();
        assert!(matches!(svc.login(login("eventninja12@", "wrong")).await, Err(AuthError::Unauthorized)));
        assert!(matches!(svc.login(login("admin", "9323641780")).await, Err(AuthError::Unauthorized)));
        assert!(matches!(svc.login(login("", "")).await, Err(AuthError::Unauthorized)));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = AuthService::new(
            Arc::new(StaticCredentialRepository::new("x", "y").unwrap()),
            AuthConfig::new("other-secret", 8),
        );
        let (token, _) = other.issue_token(&AuthUser { username: "x".into(), role: ADMIN_ROLE.into() }).unwrap();
        assert!(matches!(service().verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service();
        let past = Utc::now() - Duration::hours(9);
        let claims = Claims { sub: "eventninja12@".into(), role: ADMIN_ROLE.into(), iat: past.timestamp(), exp: (past + Duration::hours(8)).timestamp() };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap();
        assert!(matches!(svc.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn authorize_admin_classifies_failures() {
        let svc = service();
        assert!(matches!(svc.authorize_admin(None), Err(AuthError::MissingToken)));
        assert!(matches!(svc.authorize_admin(Some("  ")), Err(AuthError::MissingToken)));
        assert!(matches!(svc.authorize_admin(Some("garbage")), Err(AuthError::InvalidToken(_))));

        let (editor, _) = svc.issue_token(&AuthUser { username: "ed".into(), role: "editor".into() }).unwrap();
        assert!(matches!(svc.authorize_admin(Some(&editor)), Err(AuthError::Forbidden)));

        let (admin, _) = svc.issue_token(&AuthUser { username: "eventninja12@".into(), role: ADMIN_ROLE.into() }).unwrap();
        assert_eq!(svc.authorize_admin(Some(&admin)).unwrap().sub, "eventninja12@");
    }
}
