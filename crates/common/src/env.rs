//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::{info, warn};

/// Ensure the data and uploads directories exist, creating them when missing.
pub async fn ensure_env(data_dir: &str, uploads_dir: &str) -> anyhow::Result<()> {
    for dir in [data_dir, uploads_dir] {
        if tokio::fs::metadata(dir).await.is_err() {
            warn!(%dir, "directory not found; creating it");
        }
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {dir}: {e}"))?;
    }
    info!(%data_dir, %uploads_dir, "runtime directories ready");
    Ok(())
}
