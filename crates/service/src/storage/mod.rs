//! Storage abstractions for the service layer
//!
//! Two interchangeable content stores sit behind [`ContentStore`]: the
//! flat-file JSON store used in production and the seeded in-memory
//! database used for demos and tests.

pub mod file_storage;
pub mod filter;
pub mod mock_db;
mod seed;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use models::{Collection, Record};

use crate::errors::ServiceError;
pub use file_storage::FileStorage;
pub use filter::{FindMany, Filter};
pub use mock_db::MockDb;

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2024-05-01T10:00:00.000Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// CRUD over named collections of dynamic records.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Short backend name for logs (`file`, `memory`).
    fn backend(&self) -> &'static str;

    async fn list(&self, collection: Collection) -> Result<Vec<Record>, ServiceError>;

    async fn find_many(&self, collection: Collection, query: &FindMany) -> Result<Vec<Record>, ServiceError> {
        let rows = self.list(collection).await?;
        Ok(query.apply(&rows))
    }

    async fn get(&self, collection: Collection, id: u64) -> Result<Option<Record>, ServiceError>;

    /// Insert a record; the store assigns `id` and timestamps.
    async fn create(&self, collection: Collection, data: Record) -> Result<Record, ServiceError>;

    /// Shallow-merge `patch` into the record with `id`. `None` when absent.
    async fn update(&self, collection: Collection, id: u64, patch: Record) -> Result<Option<Record>, ServiceError>;

    /// Remove the record with `id`. Whether `false` is ever reported depends
    /// on the backend: the file store always answers `true`.
    async fn delete(&self, collection: Collection, id: u64) -> Result<bool, ServiceError>;
}
