use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use tracing::error;

/// JSON error body: `{ "error": <title>, "message": <detail> }`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, message: Option<String>) -> Self {
        Self { status, title, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.message {
            Some(msg) => json!({ "error": self.title, "message": msg }),
            None => json!({ "error": self.title }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => JsonApiError::bad_request(e.to_string()),
            ServiceError::NotFound(_) => JsonApiError::not_found(e.to_string()),
            ServiceError::Storage(_) => {
                error!(err = %e, "storage failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let (status, title) = match &e {
            AuthError::Unauthorized | AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::InvalidToken(_) | AuthError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            AuthError::HashError(_) | AuthError::TokenError(_) => {
                error!(err = %e, code = e.code(), "auth internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };
        JsonApiError::new(status, title, Some(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_to_statuses() {
        let e: JsonApiError = ServiceError::Validation("bad".into()).into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        let e: JsonApiError = ServiceError::Model(ModelError::required("title")).into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        let e: JsonApiError = ServiceError::not_found("gallery").into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        let e: JsonApiError = ServiceError::storage("io").into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_errors_map_to_statuses() {
        let status = |e: AuthError| JsonApiError::from(e).status;
        assert_eq!(status(AuthError::MissingToken), StatusCode::UNAUTHORIZED);
        assert_eq!(status(AuthError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status(AuthError::InvalidToken("exp".into())), StatusCode::FORBIDDEN);
        assert_eq!(status(AuthError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status(AuthError::TokenError("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
