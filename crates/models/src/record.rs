use serde_json::{Map, Value};

/// A stored row: an arbitrary JSON object carrying at least an integer `id`
/// once persisted.
pub type Record = Map<String, Value>;

pub const ID: &str = "id";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

pub trait RecordExt {
    fn id(&self) -> Option<u64>;

    /// Overwrite top-level fields with those of `patch`; nested values are
    /// replaced wholesale.
    fn shallow_merge(&mut self, patch: Record);

    /// Drop fields the store owns (`id`, `createdAt`, `updatedAt`).
    fn without_managed_fields(self) -> Record;
}

impl RecordExt for Record {
    fn id(&self) -> Option<u64> {
        self.get(ID).and_then(Value::as_u64)
    }

    fn shallow_merge(&mut self, patch: Record) {
        for (k, v) in patch {
            self.insert(k, v);
        }
    }

    fn without_managed_fields(mut self) -> Record {
        self.remove(ID);
        self.remove(CREATED_AT);
        self.remove(UPDATED_AT);
        self
    }
}

/// `max(existing ids) + 1`, or 1 for an empty slice.
pub fn next_id(records: &[Record]) -> u64 {
    records.iter().filter_map(RecordExt::id).max().unwrap_or(0) + 1
}
