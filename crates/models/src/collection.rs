use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Every named collection the site persists. The serialized form is the
/// camelCase name used for `data/<name>.json`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Users,
    Services,
    ServiceFeatures,
    ServiceProcessSteps,
    GalleryItems,
    Slides,
    Technologies,
    Testimonials,
    About,
    AboutTeam,
    AboutValues,
    Stats,
    BlogPosts,
    ContactSubmissions,
    Events,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 16] = [
        Collection::Users,
        Collection::Services,
        Collection::ServiceFeatures,
        Collection::ServiceProcessSteps,
        Collection::GalleryItems,
        Collection::Slides,
        Collection::Technologies,
        Collection::Testimonials,
        Collection::About,
        Collection::AboutTeam,
        Collection::AboutValues,
        Collection::Stats,
        Collection::BlogPosts,
        Collection::ContactSubmissions,
        Collection::Events,
        Collection::Settings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Services => "services",
            Collection::ServiceFeatures => "serviceFeatures",
            Collection::ServiceProcessSteps => "serviceProcessSteps",
            Collection::GalleryItems => "galleryItems",
            Collection::Slides => "slides",
            Collection::Technologies => "technologies",
            Collection::Testimonials => "testimonials",
            Collection::About => "about",
            Collection::AboutTeam => "aboutTeam",
            Collection::AboutValues => "aboutValues",
            Collection::Stats => "stats",
            Collection::BlogPosts => "blogPosts",
            Collection::ContactSubmissions => "contactSubmissions",
            Collection::Events => "events",
            Collection::Settings => "settings",
        }
    }

    /// Map a REST path segment (`/api/<resource>`) to its collection.
    pub fn from_resource(resource: &str) -> Option<Self> {
        let c = match resource {
            "services" => Collection::Services,
            "gallery" => Collection::GalleryItems,
            "testimonials" => Collection::Testimonials,
            "events" => Collection::Events,
            "blog" => Collection::BlogPosts,
            "contact" => Collection::ContactSubmissions,
            "team" => Collection::AboutTeam,
            "stats" => Collection::Stats,
            "slides" => Collection::Slides,
            "technologies" => Collection::Technologies,
            "about" => Collection::About,
            "settings" => Collection::Settings,
            _ => return None,
        };
        Some(c)
    }

    /// Collections exposed as a single object rather than a list.
    pub fn is_singleton(self) -> bool {
        matches!(self, Collection::About | Collection::Settings)
    }

    /// Collections whose public listing is private to admins.
    pub fn is_private(self) -> bool {
        matches!(self, Collection::ContactSubmissions | Collection::Users)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ModelError::UnknownCollection(s.to_string()))
    }
}
