use std::sync::Arc;

use service::auth::AdminAuthService;
use service::content::ContentService;
use service::upload::UploadStore;

/// Everything a request handler needs, built once at startup and cloned
/// into each request.
#[derive(Clone)]
pub struct ServerState {
    pub content: ContentService,
    pub auth: Arc<AdminAuthService>,
    pub uploads: Arc<UploadStore>,
    /// request body cap for `/api/upload`, in bytes
    pub upload_limit: usize,
}
