//! In-memory database with a query-builder shaped API.
//!
//! ```
//! use service::storage::{Filter, MockDb};
//! use models::Collection;
//!
//! let db = MockDb::seeded();
//! let row = tokio_test::block_on(db.find_first(Collection::Services, &Filter::by_id(1)));
//! assert!(row.is_some());
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use models::record::{self, CREATED_AT, ID, UPDATED_AT};
use models::{Collection, Record, RecordExt};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::filter::{FindMany, Filter};
use super::{now_timestamp, seed, ContentStore};
use crate::errors::ServiceError;

pub struct MockDb {
    tables: RwLock<HashMap<Collection, Vec<Record>>>,
}

/// One row or many, as accepted by [`InsertBuilder::values`].
pub enum Rows {
    One(Record),
    Many(Vec<Record>),
}

impl From<Record> for Rows {
    fn from(r: Record) -> Self { Rows::One(r) }
}

impl From<Vec<Record>> for Rows {
    fn from(r: Vec<Record>) -> Self { Rows::Many(r) }
}

impl Rows {
    fn into_vec(self) -> Vec<Record> {
        match self {
            Rows::One(r) => vec![r],
            Rows::Many(v) => v,
        }
    }
}

impl Default for MockDb {
    fn default() -> Self {
        Self::empty()
    }
}

impl MockDb {
    /// Every collection present and empty.
    pub fn empty() -> Self {
        let tables = Collection::ALL.into_iter().map(|c| (c, Vec::new())).collect();
        Self { tables: RwLock::new(tables) }
    }

    /// Every collection loaded with its fixed sample rows.
    pub fn seeded() -> Self {
        let now = now_timestamp();
        let tables = Collection::ALL
            .into_iter()
            .map(|c| {
                let rows = seed::rows(c)
                    .into_iter()
                    .map(|mut r| {
                        r.insert(CREATED_AT.into(), Value::String(now.clone()));
                        r
                    })
                    .collect();
                (c, rows)
            })
            .collect();
        Self { tables: RwLock::new(tables) }
    }

    pub async fn select(&self, table: Collection) -> Vec<Record> {
        self.tables.read().await.get(&table).cloned().unwrap_or_default()
    }

    pub async fn find_many(&self, table: Collection, query: &FindMany) -> Vec<Record> {
        let tables = self.tables.read().await;
        tables.get(&table).map(|rows| query.apply(rows)).unwrap_or_default()
    }

    pub async fn find_first(&self, table: Collection, filter: &Filter) -> Option<Record> {
        let tables = self.tables.read().await;
        tables.get(&table)?.iter().find(|r| filter.matches(r)).cloned()
    }

    pub fn insert(&self, table: Collection) -> InsertBuilder<'_> {
        InsertBuilder { db: self, table, rows: Vec::new() }
    }

    pub fn update(&self, table: Collection) -> UpdateBuilder<'_> {
        UpdateBuilder { db: self, table, patch: Record::new() }
    }

    pub fn delete(&self, table: Collection) -> DeleteBuilder<'_> {
        DeleteBuilder { db: self, table }
    }
}

pub struct InsertBuilder<'a> {
    db: &'a MockDb,
    table: Collection,
    rows: Vec<Record>,
}

impl InsertBuilder<'_> {
    pub fn values(mut self, rows: impl Into<Rows>) -> Self {
        self.rows.extend(rows.into().into_vec());
        self
    }

    /// Store the rows and return them as stored. Ids continue from the
    /// current maximum so they stay unique after deletions.
    pub async fn returning(self) -> Vec<Record> {
        let mut tables = self.db.tables.write().await;
        let rows = tables.entry(self.table).or_default();
        let first_id = record::next_id(rows);
        let now = now_timestamp();
        let inserted: Vec<Record> = self
            .rows
            .into_iter()
            .enumerate()
            .map(|(i, data)| {
                let mut row = Record::new();
                row.insert(ID.into(), Value::from(first_id + i as u64));
                row.shallow_merge(data.without_managed_fields());
                row.insert(CREATED_AT.into(), Value::String(now.clone()));
                row
            })
            .collect();
        rows.extend(inserted.iter().cloned());
        debug!(table = %self.table, count = inserted.len(), "mock insert");
        inserted
    }
}

pub struct UpdateBuilder<'a> {
    db: &'a MockDb,
    table: Collection,
    patch: Record,
}

impl UpdateBuilder<'_> {
    pub fn set(mut self, patch: Record) -> Self {
        self.patch.shallow_merge(patch);
        self
    }

    /// Merge the patch into the first matching row and stamp `updatedAt`.
    pub async fn filter(self, filter: &Filter) -> Option<Record> {
        let mut tables = self.db.tables.write().await;
        let row = tables.get_mut(&self.table)?.iter_mut().find(|r| filter.matches(r))?;
        row.shallow_merge(self.patch.without_managed_fields());
        row.insert(UPDATED_AT.into(), Value::String(now_timestamp()));
        Some(row.clone())
    }
}

pub struct DeleteBuilder<'a> {
    db: &'a MockDb,
    table: Collection,
}

impl DeleteBuilder<'_> {
    /// Remove the first matching row and return it.
    pub async fn filter(self, filter: &Filter) -> Option<Record> {
        let mut tables = self.db.tables.write().await;
        let rows = tables.get_mut(&self.table)?;
        let idx = rows.iter().position(|r| filter.matches(r))?;
        Some(rows.remove(idx))
    }
}

#[async_trait]
impl ContentStore for MockDb {
    fn backend(&self) -> &'static str { "memory" }

    async fn list(&self, collection: Collection) -> Result<Vec<Record>, ServiceError> {
        Ok(self.select(collection).await)
    }

    async fn find_many(&self, collection: Collection, query: &FindMany) -> Result<Vec<Record>, ServiceError> {
        Ok(MockDb::find_many(self, collection, query).await)
    }

    async fn get(&self, collection: Collection, id: u64) -> Result<Option<Record>, ServiceError> {
        Ok(self.find_first(collection, &Filter::by_id(id)).await)
    }

    async fn create(&self, collection: Collection, data: Record) -> Result<Record, ServiceError> {
        let mut rows = self.insert(collection).values(data).returning().await;
        rows.pop().ok_or_else(|| ServiceError::storage("insert returned no rows"))
    }

    async fn update(&self, collection: Collection, id: u64, patch: Record) -> Result<Option<Record>, ServiceError> {
        Ok(MockDb::update(self, collection).set(patch).filter(&Filter::by_id(id)).await)
    }

    async fn delete(&self, collection: Collection, id: u64) -> Result<bool, ServiceError> {
        Ok(MockDb::delete(self, collection).filter(&Filter::by_id(id)).await.is_some())
    }
}
