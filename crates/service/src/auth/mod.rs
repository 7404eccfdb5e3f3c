//! Auth module: three-layer architecture (domain, repository, service).
//!
//! The site has a single administrator. Credentials come from configuration
//! and sessions are stateless HS256 JWTs.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;

pub use service::{AdminAuthService, AuthConfig, AuthService};
