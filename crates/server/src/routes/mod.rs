use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::upload::PUBLIC_PREFIX;

use crate::state::ServerState;

pub mod auth;
pub mod content;
pub mod upload;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public content, auth, admin routes and
/// the static uploads directory.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let uploads_dir = ServeDir::new(state.uploads.dir());

    // Public routes; writes check the token inside the handler since
    // `POST /api/contact` stays open.
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/:resource", get(content::public_list).post(content::public_create))
        .route(
            "/api/:resource/:id",
            get(content::public_get).put(content::public_update).delete(content::public_delete),
        );

    // Admin routes
    let admin = Router::new()
        .route("/api/auth/verify", get(auth::verify))
        .route(
            "/api/admin/:resource",
            get(content::admin_list).post(content::admin_create).put(content::admin_upsert),
        )
        .route(
            "/api/admin/:resource/:id",
            get(content::admin_get).put(content::admin_update).delete(content::admin_delete),
        )
        .route(
            "/api/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(state.upload_limit)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    // Compose
    public
        .merge(admin)
        .nest_service(PUBLIC_PREFIX, uploads_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
