use models::{Collection, Record};
use serde_json::{json, Value};

use crate::fallback;

/// Sample rows loaded into a fresh [`super::MockDb`].
pub(super) fn rows(collection: Collection) -> Vec<Record> {
    let value = match collection {
        Collection::Users => json!([
            { "id": 1, "username": "admin", "role": "admin" }
        ]),
        Collection::ServiceFeatures => json!([
            { "id": 1, "serviceId": 1, "feature": "Venue sourcing" },
            { "id": 2, "serviceId": 1, "feature": "AV production" },
            { "id": 3, "serviceId": 2, "feature": "Decor and florals" }
        ]),
        Collection::ServiceProcessSteps => json!([
            { "id": 1, "serviceId": 1, "step": 1, "title": "Discovery call" },
            { "id": 2, "serviceId": 1, "step": 2, "title": "Proposal and budget" },
            { "id": 3, "serviceId": 1, "step": 3, "title": "Execution" }
        ]),
        Collection::AboutValues => json!([
            { "id": 1, "title": "Ownership", "description": "We treat every event as our own." },
            { "id": 2, "title": "Craft", "description": "Details are the event." }
        ]),
        Collection::ContactSubmissions => json!([]),
        other => match fallback::payload(other) {
            Some(Value::Array(items)) => Value::Array(items),
            Some(single @ Value::Object(_)) => Value::Array(vec![single]),
            _ => json!([]),
        },
    };
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
