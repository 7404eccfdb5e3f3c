//! Shared helpers for the event-site workspace: logging setup, runtime
//! directory checks and small wire types used by more than one crate.

pub mod env;
pub mod types;
pub mod utils;
