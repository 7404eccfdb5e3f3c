//! Hardcoded payloads served when a collection cannot be read or is empty,
//! so the public pages always have something to render.

use models::Collection;
use serde_json::{json, Value};

/// Fallback for `collection`: an array for list collections, an object for
/// singletons, `None` when the collection has no public fallback.
pub fn payload(collection: Collection) -> Option<Value> {
    let v = match collection {
        Collection::Services => services(),
        Collection::GalleryItems => gallery(),
        Collection::Testimonials => testimonials(),
        Collection::Events => events(),
        Collection::BlogPosts => blog_posts(),
        Collection::AboutTeam => team(),
        Collection::Stats => stats(),
        Collection::Slides => slides(),
        Collection::Technologies => technologies(),
        Collection::About => about(),
        Collection::Settings => settings(),
        _ => return None,
    };
    Some(v)
}

/// Fallback for `collection`, or the empty value of its shape.
pub fn payload_or_empty(collection: Collection) -> Value {
    payload(collection).unwrap_or_else(|| {
        if collection.is_singleton() { json!({}) } else { json!([]) }
    })
}

fn gallery() -> Value {
    json!([
        {
            "id": 1,
            "title": "Corporate Annual Meet",
            "description": "Stage, lighting and hospitality for a 1,200 guest annual meet.",
            "imageUrl": "https://res.cloudinary.com/demo/image/upload/v1/events/corporate-meet.jpg",
            "category": "corporate"
        },
        {
            "id": 2,
            "title": "Beachside Wedding",
            "description": "Sunset ceremony with floral mandap and live music.",
            "imageUrl": "https://res.cloudinary.com/demo/image/upload/v1/events/beach-wedding.jpg",
            "category": "wedding"
        },
        {
            "id": 3,
            "title": "City Marathon",
            "description": "Route logistics, timing and hydration stations for 8,000 runners.",
            "imageUrl": "https://res.cloudinary.com/demo/image/upload/v1/events/city-marathon.jpg",
            "category": "sports"
        },
        {
            "id": 4,
            "title": "Festival of Lights",
            "description": "Cultural evening with folk performances and food stalls.",
            "imageUrl": "https://res.cloudinary.com/demo/image/upload/v1/events/festival-lights.jpg",
            "category": "cultural"
        }
    ])
}

fn services() -> Value {
    json!([
        {
            "id": 1,
            "title": "Corporate Events",
            "slug": "corporate-events",
            "description": "Conferences, product launches and offsites planned end to end.",
            "icon": "briefcase"
        },
        {
            "id": 2,
            "title": "Weddings",
            "slug": "weddings",
            "description": "Venue styling, guest management and day-of coordination.",
            "icon": "heart"
        },
        {
            "id": 3,
            "title": "Sports Events",
            "slug": "sports-events",
            "description": "Tournaments, marathons and fan zones with full logistics.",
            "icon": "trophy"
        }
    ])
}

fn testimonials() -> Value {
    json!([
        {
            "id": 1,
            "name": "Priya Sharma",
            "company": "Nimbus Tech",
            "content": "Our product launch ran to the minute. The team handled everything.",
            "rating": 5
        },
        {
            "id": 2,
            "name": "Rahul Mehta",
            "company": null,
            "content": "They turned our wedding plans into a weekend our families still talk about.",
            "rating": 5
        }
    ])
}

fn events() -> Value {
    json!([
        {
            "id": 1,
            "title": "Tech Summit 2024",
            "slug": "tech-summit-2024",
            "date": "2024-02-15",
            "location": "Mumbai",
            "category": "corporate",
            "description": "Two-day summit with 40 speakers and 2,000 attendees."
        }
    ])
}

fn blog_posts() -> Value {
    json!([
        {
            "id": 1,
            "title": "Planning a Destination Wedding",
            "slug": "planning-a-destination-wedding",
            "excerpt": "Timelines, budgets and vendors for a wedding away from home.",
            "content": "Start with the guest list, then pick the venue.",
            "published": true
        }
    ])
}

fn team() -> Value {
    json!([
        { "id": 1, "name": "Aarav Patel", "role": "Founder & Creative Director" },
        { "id": 2, "name": "Meera Iyer", "role": "Head of Operations" }
    ])
}

fn stats() -> Value {
    json!([
        { "id": 1, "label": "Events Delivered", "value": "500+" },
        { "id": 2, "label": "Happy Clients", "value": "350+" },
        { "id": 3, "label": "Cities", "value": "25" }
    ])
}

fn slides() -> Value {
    json!([
        {
            "id": 1,
            "title": "Events that people remember",
            "subtitle": "Corporate, weddings, sports and culture",
            "imageUrl": "https://res.cloudinary.com/demo/image/upload/v1/slides/hero.jpg"
        }
    ])
}

fn technologies() -> Value {
    json!([
        { "id": 1, "name": "LED Walls", "icon": "monitor" },
        { "id": 2, "name": "Live Streaming", "icon": "video" },
        { "id": 3, "name": "RFID Check-in", "icon": "scan" }
    ])
}

fn about() -> Value {
    json!({
        "id": 1,
        "title": "About Us",
        "story": "We started as a two-person crew running college fests and now plan events across the country.",
        "mission": "Make every event effortless for the host and memorable for the guests."
    })
}

fn settings() -> Value {
    json!({
        "id": 1,
        "siteName": "Event Ninja",
        "contactEmail": "hello@eventninja.example",
        "contactPhone": "+91 00000 00000",
        "address": "Mumbai, India",
        "socialLinks": { "instagram": "", "facebook": "", "linkedin": "" }
    })
}
