//! Data model of the event site: the named collections, the dynamic record
//! shape stored in them, and typed input schemas used to validate writes.

pub mod collection;
pub mod content;
pub mod errors;
pub mod record;

pub use collection::Collection;
pub use record::{Record, RecordExt};
