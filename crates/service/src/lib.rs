//! Service layer for the event site.
//! - Content stores (flat-file and in-memory) behind one trait.
//! - Business rules for public/admin reads and writes, with fallbacks.
//! - Single-administrator JWT auth and upload storage.

pub mod auth;
pub mod content;
pub mod errors;
pub mod fallback;
pub mod storage;
pub mod upload;
