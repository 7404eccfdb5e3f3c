use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use serde::Serialize;
use service::upload::StoredFile;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct UploadOutput {
    /// First stored file, for single-image forms.
    pub url: String,
    pub filename: String,
    pub size: usize,
    pub files: Vec<StoredFile>,
}

fn multipart_error(e: MultipartError) -> JsonApiError {
    warn!(err = %e, "multipart rejected");
    JsonApiError::new(e.status(), "Upload Error", Some(e.body_text()))
}

/// `POST /api/upload`: store every file part of a multipart body.
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<Json<UploadOutput>, JsonApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        // plain form fields are ignored
        let Some(original) = field.file_name().map(str::to_string) else {
            continue;
        };
        let name = field.name().unwrap_or("file").to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        files.push(state.uploads.save(&name, Some(&original), &bytes).await?);
    }

    let Some(first) = files.first().cloned() else {
        return Err(JsonApiError::bad_request("no file uploaded"));
    };
    Ok(Json(UploadOutput { url: first.url, filename: first.filename, size: first.size, files }))
}
