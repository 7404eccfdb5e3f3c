use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use models::record::{self, CREATED_AT, ID, UPDATED_AT};
use models::{Collection, Record, RecordExt};
use serde_json::Value;
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, instrument};

use super::{now_timestamp, ContentStore};
use crate::errors::ServiceError;

/// Flat-file JSON store: one pretty-printed array per collection at
/// `<data_dir>/<collection>.json`.
///
/// Every mutation rewrites the whole file. Operations within this process
/// are serialized through `lock`; separate processes sharing a data dir can
/// still lose updates.
pub struct FileStorage {
    data_dir: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Initialize the store, creating `data_dir` if missing. Collection files
    /// are created lazily on first write.
    pub async fn new<P: Into<PathBuf>>(data_dir: P) -> Result<Arc<Self>, ServiceError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await.map_err(ServiceError::storage)?;
        Ok(Arc::new(Self { data_dir, lock: Mutex::new(()) }))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(format!("{}.json", collection.name()))
    }

    /// Read a collection, logging and returning an empty list on any read or
    /// parse failure.
    pub async fn get(&self, collection: Collection) -> Vec<Record> {
        let _guard = self.lock.lock().await;
        match self.read(collection).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(%collection, err = %e, "failed to read collection");
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, collection: Collection, id: u64) -> Result<Option<Record>, ServiceError> {
        let _guard = self.lock.lock().await;
        let rows = self.read(collection).await?;
        Ok(rows.into_iter().find(|r| r.id() == Some(id)))
    }

    /// Append `{ id, ...data, createdAt, updatedAt }` with
    /// `id = max(existing ids) + 1`.
    #[instrument(skip(self, data), fields(collection = %collection))]
    pub async fn create(&self, collection: Collection, data: Record) -> Result<Record, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut rows = self.read(collection).await?;
        let id = record::next_id(&rows);
        let now = now_timestamp();

        let mut row = Record::new();
        row.insert(ID.into(), Value::from(id));
        row.shallow_merge(data.without_managed_fields());
        row.insert(CREATED_AT.into(), Value::String(now.clone()));
        row.insert(UPDATED_AT.into(), Value::String(now));

        rows.push(row.clone());
        self.write(collection, &rows).await?;
        debug!(id, "record created");
        Ok(row)
    }

    /// Shallow-merge `patch` into the record with `id` and refresh
    /// `updatedAt`. A missing id leaves the file untouched.
    #[instrument(skip(self, patch), fields(collection = %collection))]
    pub async fn update(&self, collection: Collection, id: u64, patch: Record) -> Result<Option<Record>, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut rows = self.read(collection).await?;
        let Some(row) = rows.iter_mut().find(|r| r.id() == Some(id)) else {
            return Ok(None);
        };
        row.shallow_merge(patch.without_managed_fields());
        row.insert(UPDATED_AT.into(), Value::String(now_timestamp()));
        let updated = row.clone();
        self.write(collection, &rows).await?;
        Ok(Some(updated))
    }

    /// Filter out the record with `id` and rewrite the file. Answers `true`
    /// whether or not a record was removed.
    #[instrument(skip(self), fields(collection = %collection))]
    pub async fn delete(&self, collection: Collection, id: u64) -> Result<bool, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut rows = self.read(collection).await?;
        let before = rows.len();
        rows.retain(|r| r.id() != Some(id));
        debug!(removed = before - rows.len(), "delete filtered collection");
        self.write(collection, &rows).await?;
        Ok(true)
    }

    async fn read(&self, collection: Collection) -> Result<Vec<Record>, ServiceError> {
        let path = self.path_for(collection);
        let bytes = match fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ServiceError::storage(format!("{}: {e}", path.display()))),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::storage(format!("{}: {e}", path.display())))
    }

    async fn write(&self, collection: Collection, rows: &[Record]) -> Result<(), ServiceError> {
        // serde_json's pretty printer indents with two spaces
        let data = serde_json::to_vec_pretty(rows).map_err(ServiceError::storage)?;
        fs::write(self.path_for(collection), data).await.map_err(ServiceError::storage)
    }
}

#[async_trait]
impl ContentStore for FileStorage {
    fn backend(&self) -> &'static str { "file" }

    async fn list(&self, collection: Collection) -> Result<Vec<Record>, ServiceError> {
        let _guard = self.lock.lock().await;
        self.read(collection).await
    }

    async fn get(&self, collection: Collection, id: u64) -> Result<Option<Record>, ServiceError> {
        self.get_by_id(collection, id).await
    }

    async fn create(&self, collection: Collection, data: Record) -> Result<Record, ServiceError> {
        FileStorage::create(self, collection, data).await
    }

    async fn update(&self, collection: Collection, id: u64, patch: Record) -> Result<Option<Record>, ServiceError> {
        FileStorage::update(self, collection, id, patch).await
    }

    async fn delete(&self, collection: Collection, id: u64) -> Result<bool, ServiceError> {
        FileStorage::delete(self, collection, id).await
    }
}
