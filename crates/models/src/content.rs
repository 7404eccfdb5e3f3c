//! Typed create schemas for the writable collections.
//!
//! Stores accept arbitrary fields; these schemas only guard the fields the
//! public site needs in order to render a record. Unknown fields pass through.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::Collection;
use crate::errors::ModelError;
use crate::record::Record;

pub trait Validate {
    fn validate(&self) -> Result<(), ModelError>;
}

fn non_empty(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::required(field));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| ModelError::Validation("invalid email".into()))?;
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<(), ModelError> {
    let ok = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !ok {
        return Err(ModelError::Validation("slug must be lowercase letters, digits and dashes".into()));
    }
    Ok(())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Validate for ServiceInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("title", &self.title)?;
        non_empty("description", &self.description)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItemInput {
    pub title: String,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for GalleryItemInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("title", &self.title)?;
        non_empty("imageUrl", &self.image_url)?;
        non_empty("category", &self.category)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialInput {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
}

impl Validate for TestimonialInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("name", &self.name)?;
        non_empty("content", &self.content)?;
        if let Some(r) = self.rating {
            if !(1..=5).contains(&r) {
                return Err(ModelError::Validation("rating must be between 1 and 5".into()));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for EventInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("title", &self.title)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostInput {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
}

impl Validate for BlogPostInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("title", &self.title)?;
        non_empty("content", &self.content)?;
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionInput {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
}

impl Validate for ContactSubmissionInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("name", &self.name)?;
        non_empty("message", &self.message)?;
        validate_email(&self.email)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberInput {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Validate for TeamMemberInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("name", &self.name)?;
        non_empty("role", &self.role)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatInput {
    pub label: String,
    pub value: Value,
}

impl Validate for StatInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("label", &self.label)?;
        match &self.value {
            Value::Number(_) => Ok(()),
            Value::String(s) if !s.trim().is_empty() => Ok(()),
            _ => Err(ModelError::Validation("value must be a number or a non-empty string".into())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideInput {
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

impl Validate for SlideInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("title", &self.title)?;
        non_empty("imageUrl", &self.image_url)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TechnologyInput {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Validate for TechnologyInput {
    fn validate(&self) -> Result<(), ModelError> {
        non_empty("name", &self.name)
    }
}

fn check<T: DeserializeOwned + Validate>(payload: &Record) -> Result<(), ModelError> {
    let typed: T = serde_json::from_value(Value::Object(payload.clone()))
        .map_err(|e| ModelError::Validation(e.to_string()))?;
    typed.validate()
}

/// Validate a create payload against the schema of `collection`.
/// Collections without a schema accept anything.
pub fn validate_payload(collection: Collection, payload: &Record) -> Result<(), ModelError> {
    match collection {
        Collection::Services => check::<ServiceInput>(payload),
        Collection::GalleryItems => check::<GalleryItemInput>(payload),
        Collection::Testimonials => check::<TestimonialInput>(payload),
        Collection::Events => check::<EventInput>(payload),
        Collection::BlogPosts => check::<BlogPostInput>(payload),
        Collection::ContactSubmissions => check::<ContactSubmissionInput>(payload),
        Collection::AboutTeam => check::<TeamMemberInput>(payload),
        Collection::Stats => check::<StatInput>(payload),
        Collection::Slides => check::<SlideInput>(payload),
        Collection::Technologies => check::<TechnologyInput>(payload),
        _ => Ok(()),
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
    fn gallery_requires_image_and_category() {
        let ok = rec(json!({"title": "Gala", "imageUrl": "/uploads/a.jpg", "category": "corporate", "extra": 1}));
        assert!(validate_payload(Collection::GalleryItems, &ok).is_ok());

        let missing = rec(json!({"title": "Gala", "category": "corporate"}));
        assert!(matches!(validate_payload(Collection::GalleryItems, &missing), Err(ModelError::Validation(_))));

        let blank = rec(json!({"title": " ", "imageUrl": "x", "category": "c"}));
        assert_eq!(
            validate_payload(Collection::GalleryItems, &blank),
            Err(ModelError::required("title"))
        );
    }

    #[test]
    fn contact_checks_email() {
        let bad = rec(json!({"name": "A", "email": "nope", "message": "hi"}));
        assert!(validate_payload(Collection::ContactSubmissions, &bad).is_err());
        let good = rec(json!({"name": "A", "email": "a@b.com", "message": "hi", "eventType": "wedding"}));
        assert!(validate_payload(Collection::ContactSubmissions, &good).is_ok());
    }

    #[test]
    fn testimonial_rating_bounds() {
        let bad = rec(json!({"name": "A", "content": "great", "rating": 6}));
        assert!(validate_payload(Collection::Testimonials, &bad).is_err());
        let good = rec(json!({"name": "A", "content": "great", "rating": 5}));
        assert!(validate_payload(Collection::Testimonials, &good).is_ok());
    }

    #[test]
    fn blog_slug_format() {
        assert!(validate_slug("summer-gala-2024").is_ok());
        assert!(validate_slug("Summer Gala").is_err());
        assert!(validate_slug("-lead").is_err());
        let bad = rec(json!({"title": "T", "content": "C", "slug": "Bad Slug"}));
        assert!(validate_payload(Collection::BlogPosts, &bad).is_err());
    }

    #[test]
    fn stat_value_number_or_text() {
        assert!(validate_payload(Collection::Stats, &rec(json!({"label": "Events", "value": 500}))).is_ok());
        assert!(validate_payload(Collection::Stats, &rec(json!({"label": "Events", "value": "500+"}))).is_ok());
        assert!(validate_payload(Collection::Stats, &rec(json!({"label": "Events", "value": null}))).is_err());
    }

    #[test]
    fn schemaless_collections_accept_anything() {
        assert!(validate_payload(Collection::Settings, &rec(json!({"anything": [1, 2]}))).is_ok());
        assert!(validate_payload(Collection::ServiceFeatures, &Record::new()).is_ok());
    }
}
