//! Business rules on top of a [`ContentStore`]: schema checks on create,
//! not-found mapping, fallback payloads for public reads, and the
//! single-object `about`/`settings` resources.

use std::sync::Arc;

use models::content::validate_payload;
use models::{Collection, Record};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::errors::ServiceError;
use crate::fallback;
use crate::storage::{ContentStore, FindMany};

#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Listing for the public site. Never fails: a read error degrades to the
    /// fallback payload (or `[]`), and an empty collection read without a
    /// filter shows the fallback so pages are never blank. Paging past the
    /// end of live rows yields `[]`.
    #[instrument(skip(self, query), fields(collection = %collection))]
    pub async fn public_list(&self, collection: Collection, query: &FindMany) -> Value {
        match self.store.list(collection).await {
            Ok(rows) if rows.is_empty() && query.filter.is_none() => {
                info!("collection empty; serving fallback");
                self.fallback_rows(collection, query)
            }
            Ok(rows) => Value::Array(query.apply(&rows).into_iter().map(Value::Object).collect()),
            Err(e) => {
                error!(err = %e, "read failed; serving fallback");
                self.fallback_rows(collection, query)
            }
        }
    }

    fn fallback_rows(&self, collection: Collection, query: &FindMany) -> Value {
        let rows: Vec<Record> = match fallback::payload(collection) {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(m) => Some(m),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        Value::Array(query.apply(&rows).into_iter().map(Value::Object).collect())
    }

    /// Unfiltered, fallback-free listing for the admin panel.
    pub async fn admin_list(&self, collection: Collection, query: &FindMany) -> Result<Vec<Record>, ServiceError> {
        self.store.find_many(collection, query).await
    }

    pub async fn get(&self, collection: Collection, id: u64) -> Result<Record, ServiceError> {
        self.store
            .get(collection, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(&format!("{collection} {id}")))
    }

    #[instrument(skip(self, data), fields(collection = %collection))]
    pub async fn create(&self, collection: Collection, data: Record) -> Result<Record, ServiceError> {
        validate_payload(collection, &data)?;
        let created = self.store.create(collection, data).await?;
        info!(id = ?created.get("id"), "record created");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(collection = %collection))]
    pub async fn update(&self, collection: Collection, id: u64, patch: Record) -> Result<Record, ServiceError> {
        self.store
            .update(collection, id, patch)
            .await?
            .ok_or_else(|| ServiceError::not_found(&format!("{collection} {id}")))
    }

    #[instrument(skip(self), fields(collection = %collection))]
    pub async fn delete(&self, collection: Collection, id: u64) -> Result<(), ServiceError> {
        if self.store.delete(collection, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(&format!("{collection} {id}")))
        }
    }

    /// First record of a single-object collection, or its fallback object.
    pub async fn singleton(&self, collection: Collection) -> Value {
        match self.store.list(collection).await {
            Ok(rows) => match rows.into_iter().next() {
                Some(first) => Value::Object(first),
                None => fallback::payload_or_empty(collection),
            },
            Err(e) => {
                warn!(%collection, err = %e, "read failed; serving fallback");
                fallback::payload_or_empty(collection)
            }
        }
    }

    /// Update the first record of a single-object collection, creating it
    /// when the collection is empty.
    #[instrument(skip(self, patch), fields(collection = %collection))]
    pub async fn upsert_singleton(&self, collection: Collection, patch: Record) -> Result<Record, ServiceError> {
        let existing = self.store.list(collection).await?;
        let first_id = existing.first().and_then(|r| r.get("id")).and_then(Value::as_u64);
        match first_id {
            Some(id) => self.update(collection, id, patch).await,
            None => self.store.create(collection, patch).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Filter, MockDb};
    use async_trait::async_trait;
    use serde_json::json;

    fn rec(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    fn empty_service() -> ContentService {
        ContentService::new(Arc::new(MockDb::empty()))
    }

    struct BrokenStore;

    #[async_trait]
    impl ContentStore for BrokenStore {
        fn backend(&self) -> &'static str { "broken" }
        async fn list(&self, _: Collection) -> Result<Vec<Record>, ServiceError> {
            Err(ServiceError::storage("disk on fire"))
        }
        async fn get(&self, _: Collection, _: u64) -> Result<Option<Record>, ServiceError> {
            Err(ServiceError::storage("disk on fire"))
        }
        async fn create(&self, _: Collection, _: Record) -> Result<Record, ServiceError> {
            Err(ServiceError::storage("disk on fire"))
        }
        async fn update(&self, _: Collection, _: u64, _: Record) -> Result<Option<Record>, ServiceError> {
            Err(ServiceError::storage("disk on fire"))
        }
        async fn delete(&self, _: Collection, _: u64) -> Result<bool, ServiceError> {
            Err(ServiceError::storage("disk on fire"))
        }
    }

    #[tokio::test]
    async fn empty_collection_serves_fallback() {
        let svc = empty_service();
        let gallery = svc.public_list(Collection::GalleryItems, &FindMany::default()).await;
        assert_eq!(gallery.as_array().unwrap().len(), 4);

        // no fallback defined -> empty array
        let contact = svc.public_list(Collection::ContactSubmissions, &FindMany::default()).await;
        assert_eq!(contact, json!([]));
    }

    #[tokio::test]
    async fn filtered_empty_result_is_not_replaced() {
        let svc = empty_service();
        let q = FindMany::filtered(Filter::eq("category", "wedding"));
        assert_eq!(svc.public_list(Collection::GalleryItems, &q).await, json!([]));
    }

    #[tokio::test]
    async fn read_errors_degrade_to_fallback() {
        let svc = ContentService::new(Arc::new(BrokenStore));
        let q = FindMany::filtered(Filter::eq("category", "sports"));
        let rows = svc.public_list(Collection::GalleryItems, &q).await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["title"], json!("City Marathon"));

        assert_eq!(svc.singleton(Collection::Settings).await["siteName"], json!("Event Ninja"));
        assert!(matches!(svc.admin_list(Collection::Services, &FindMany::default()).await, Err(ServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn live_rows_win_over_fallback() -> Result<(), ServiceError> {
        let svc = empty_service();
        svc.create(Collection::Stats, rec(json!({"label": "Venues", "value": 12}))).await?;
        let stats = svc.public_list(Collection::Stats, &FindMany::default()).await;
        assert_eq!(stats.as_array().unwrap().len(), 1);
        assert_eq!(stats[0]["label"], json!("Venues"));
        Ok(())
    }

    #[tokio::test]
    async fn paging_past_live_rows_is_empty() -> Result<(), ServiceError> {
        let svc = empty_service();
        for (title, category) in [("Gala", "corporate"), ("Vows", "wedding"), ("Derby", "sports")] {
            let item = rec(json!({"title": title, "imageUrl": "/uploads/x.jpg", "category": category}));
            svc.create(Collection::GalleryItems, item).await?;
        }
        let past_end = FindMany { filter: None, limit: Some(10), offset: Some(3) };
        assert_eq!(svc.public_list(Collection::GalleryItems, &past_end).await, json!([]));

        let zero = FindMany { filter: None, limit: Some(0), offset: None };
        assert_eq!(svc.public_list(Collection::GalleryItems, &zero).await, json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_payload() {
        let svc = empty_service();
        let err = svc.create(Collection::GalleryItems, rec(json!({"title": "No image"}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        assert!(svc.admin_list(Collection::GalleryItems, &FindMany::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let svc = empty_service();
        assert!(matches!(svc.get(Collection::Events, 1).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update(Collection::Events, 1, Record::new()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(Collection::Events, 1).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn singleton_upsert_creates_then_updates() -> Result<(), ServiceError> {
        let svc = empty_service();
        assert_eq!(svc.singleton(Collection::About).await["title"], json!("About Us"));

        let created = svc.upsert_singleton(Collection::About, rec(json!({"title": "Our Story"}))).await?;
        assert_eq!(created["id"], json!(1));
        let updated = svc.upsert_singleton(Collection::About, rec(json!({"mission": "Less stress"}))).await?;
        assert_eq!(updated["id"], json!(1));
        assert_eq!(updated["title"], json!("Our Story"));

        let current = svc.singleton(Collection::About).await;
        assert_eq!(current["mission"], json!("Less stress"));
        assert_eq!(svc.admin_list(Collection::About, &FindMany::default()).await?.len(), 1);
        Ok(())
    }
}
