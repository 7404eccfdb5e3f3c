//! Equality filters over stored records.
//!
//! `Filter` replaces the duck-typed `where: { field: { value } }` objects the
//! admin client still sends; [`Filter::from_where`] converts that shape.

use std::collections::HashMap;

use models::record::Record;
use serde_json::Value;

use crate::errors::ServiceError;

#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// `row[field] == value`; an absent field never matches
    Eq { field: String, value: Value },
    /// conjunction; empty matches every row
    All(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq { field: field.into(), value: value.into() }
    }

    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::All(filters.into_iter().collect())
    }

    /// The filter that matches everything.
    pub fn any() -> Self {
        Filter::All(Vec::new())
    }

    pub fn by_id(id: u64) -> Self {
        Filter::eq(models::record::ID, id)
    }

    pub fn matches(&self, row: &Record) -> bool {
        match self {
            Filter::Eq { field, value } => row.get(field) == Some(value),
            Filter::All(filters) => filters.iter().all(|f| f.matches(row)),
        }
    }

    /// Convert a legacy `where` object.
    ///
    /// - `{ key: { field: { name }, value } }` compares `row[name]` (or
    ///   `row[key]` when `field.name` is absent) with `value`
    /// - `{ key: { ...nested } }` is evaluated against the same row
    /// - `{ key: literal }` compares `row[key]` with the literal
    pub fn from_where(conditions: &Record) -> Self {
        let parts = conditions.iter().map(|(key, cond)| match cond {
            Value::Object(obj) if obj.contains_key("value") => {
                let field = obj
                    .get("field")
                    .and_then(|f| f.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or(key);
                Filter::eq(field, obj["value"].clone())
            }
            Value::Object(nested) => Filter::from_where(nested),
            literal => Filter::eq(key.as_str(), literal.clone()),
        });
        Filter::all(parts)
    }
}

/// Options of a `find_many` call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindMany {
    pub filter: Option<Filter>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl FindMany {
    pub fn filtered(filter: Filter) -> Self {
        Self { filter: Some(filter), ..Self::default() }
    }

    /// Filter in insertion order, skip `offset`, then truncate to `limit`.
    pub fn apply<'a, I>(&self, rows: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let matched = rows
            .into_iter()
            .filter(|r| self.filter.as_ref().map_or(true, |f| f.matches(r)))
            .skip(self.offset.unwrap_or(0));
        match self.limit {
            Some(limit) => matched.take(limit).cloned().collect(),
            None => matched.cloned().collect(),
        }
    }

    /// Build from URL query parameters: `limit` and `offset` are paging, every
    /// other key is an equality condition.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, ServiceError> {
        let mut out = FindMany::default();
        let mut conditions = Vec::new();
        let mut pairs: Vec<_> = params.iter().collect();
        pairs.sort();
        for (key, raw) in pairs {
            match key.as_str() {
                "limit" => out.limit = Some(parse_usize(key, raw)?),
                "offset" => out.offset = Some(parse_usize(key, raw)?),
                _ => conditions.push(Filter::eq(key.as_str(), query_value(raw))),
            }
        }
        if !conditions.is_empty() {
            out.filter = Some(Filter::All(conditions));
        }
        Ok(out)
    }
}

fn parse_usize(key: &str, raw: &str) -> Result<usize, ServiceError> {
    raw.parse()
        .map_err(|_| ServiceError::Validation(format!("{key} must be a non-negative integer")))
}

/// Interpret a query-string value: booleans, null and integers are typed,
/// everything else stays a string.
pub fn query_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => raw
            .parse::<u64>()
            .map(Value::from)
            .or_else(|_| raw.parse::<i64>().map(Value::from))
            .unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_condition_matches_everything() {
        let rows = [rec(json!({"id": 1})), Record::new(), rec(json!({"title": null}))];
        for row in &rows {
            assert!(Filter::any().matches(row));
            assert!(Filter::from_where(&Record::new()).matches(row));
        }
    }

    #[test]
    fn eq_is_strict() {
        let row = rec(json!({"id": 2, "category": "wedding", "featured": true}));
        assert!(Filter::eq("category", "wedding").matches(&row));
        assert!(!Filter::eq("category", "Wedding").matches(&row));
        assert!(!Filter::eq("id", "2").matches(&row));
        assert!(!Filter::eq("missing", Value::Null).matches(&row));
        assert!(Filter::all([Filter::by_id(2), Filter::eq("featured", true)]).matches(&row));
        assert!(!Filter::all([Filter::by_id(2), Filter::eq("featured", false)]).matches(&row));
    }

    #[test]
    fn legacy_where_shapes() {
        let row = rec(json!({"id": 5, "slug": "summer-gala", "published": true}));

        // { id: { field: { name: "id" }, value: 5 } }
        let w = rec(json!({"id": {"field": {"name": "id"}, "value": 5}}));
        assert_eq!(Filter::from_where(&w), Filter::all([Filter::eq("id", 5)]));
        assert!(Filter::from_where(&w).matches(&row));

        // field.name wins over the key
        let w = rec(json!({"anything": {"field": {"name": "slug"}, "value": "summer-gala"}}));
        assert!(Filter::from_where(&w).matches(&row));

        // nested objects recurse against the same row
        let w = rec(json!({"and": {"published": true, "id": 5}}));
        assert!(Filter::from_where(&w).matches(&row));
        let w = rec(json!({"and": {"published": false}}));
        assert!(!Filter::from_where(&w).matches(&row));

        // first mismatch fails the whole condition
        let w = rec(json!({"id": 5, "slug": "other"}));
        assert!(!Filter::from_where(&w).matches(&row));
    }

    #[test]
    fn find_many_offsets_then_limits() {
        let rows: Vec<Record> = (1..=6)
            .map(|i| rec(json!({"id": i, "even": i % 2 == 0})))
            .collect();
        let q = FindMany { filter: None, limit: Some(2), offset: Some(1) };
        let ids: Vec<_> = q.apply(&rows).iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(2), json!(3)]);

        let q = FindMany { filter: Some(Filter::eq("even", true)), limit: Some(5), offset: Some(1) };
        let ids: Vec<_> = q.apply(&rows).iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(4), json!(6)]);

        assert_eq!(FindMany::default().apply(&rows).len(), 6);
    }

    #[test]
    fn query_params_become_find_many() {
        let params = HashMap::from([
            ("limit".to_string(), "3".to_string()),
            ("category".to_string(), "wedding".to_string()),
            ("featured".to_string(), "true".to_string()),
        ]);
        let q = FindMany::from_query(&params).unwrap();
        assert_eq!(q.limit, Some(3));
        assert_eq!(q.offset, None);
        let row = rec(json!({"category": "wedding", "featured": true}));
        assert!(q.filter.as_ref().unwrap().matches(&row));

        let bad = HashMap::from([("offset".to_string(), "-1".to_string())]);
        assert!(matches!(FindMany::from_query(&bad), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn query_value_typing() {
        assert_eq!(query_value("42"), json!(42));
        assert_eq!(query_value("-3"), json!(-3));
        assert_eq!(query_value("false"), json!(false));
        assert_eq!(query_value("500+"), json!("500+"));
    }
}
