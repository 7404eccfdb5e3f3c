use std::sync::Arc;

use axum::Router;
use common::env::ensure_env;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;
use service::{
    auth::{repository::StaticCredentialRepository, AdminAuthService, AuthConfig},
    content::ContentService,
    storage::{ContentStore, FileStorage, MockDb},
    upload::UploadStore,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the content store, admin auth and upload directory from config.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let store: Arc<dyn ContentStore> = match cfg.storage.backend {
        StorageBackend::File => FileStorage::new(&cfg.storage.data_dir).await?,
        StorageBackend::Memory => Arc::new(MockDb::seeded()),
    };
    info!(backend = store.backend(), "content store ready");

    let repo = StaticCredentialRepository::new(&cfg.auth.admin_username, &cfg.auth.admin_password)?;
    let auth = AdminAuthService::new(
        Arc::new(repo),
        AuthConfig::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_hours),
    );

    Ok(ServerState {
        content: ContentService::new(store),
        auth: Arc::new(auth),
        uploads: UploadStore::new(&cfg.storage.uploads_dir).await?,
        upload_limit: cfg.upload.max_bytes,
    })
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate()?;
    ensure_env(&cfg.storage.data_dir, &cfg.storage.uploads_dir).await?;

    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr = cfg.server.bind_addr();
    info!(%addr, "starting event site api");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
