use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use tracing::warn;

use service::auth::domain::{AuthUser, Claims, LoginInput};

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Serialize)]
pub struct LoginOutput {
    pub token: String,
    pub user: AuthUser,
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

#[derive(Serialize)]
pub struct VerifyOutput {
    pub valid: bool,
    pub user: AuthUser,
}

pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let Json(input) = payload.map_err(|e| JsonApiError::bad_request(e.body_text()))?;
    let session = state.auth.login(input).await?;

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    Ok((jar, Json(LoginOutput { token: session.token, user: session.user, expires_at: session.expires_at })))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

pub async fn verify(Extension(claims): Extension<Claims>) -> Json<VerifyOutput> {
    Json(VerifyOutput { valid: true, user: claims.user() })
}

/// Token from `Authorization: Bearer <token>`, falling back to the
/// `auth_token` cookie set by login.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    from_header.or_else(|| {
        CookieJar::from_headers(headers)
            .get(AUTH_COOKIE)
            .map(|c| c.value().to_string())
    })
}

/// Check the request carries an admin token.
pub fn authorize(state: &ServerState, headers: &HeaderMap) -> Result<Claims, JsonApiError> {
    let token = bearer_token(headers);
    state.auth.authorize_admin(token.as_deref()).map_err(|e| {
        warn!(err = %e, "admin authorization failed");
        JsonApiError::from(e)
    })
}

/// Middleware for admin routes: a missing token is 401, an invalid, expired
/// or non-admin token is 403. Verified claims are attached to the request.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let claims = authorize(&state, req.headers())?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
