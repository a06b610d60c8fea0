//! Auth module: three-layer architecture (domain, repository, service).
//!
//! User accounts, password hashing and bearer-token issuing live here; the
//! HTTP layer only decodes tokens through [`AuthService::verify_token`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthConfig, AuthService};
