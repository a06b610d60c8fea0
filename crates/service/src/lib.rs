//! Service layer for the clinic: persistence gateway, validation and
//! authorization stages, and user accounts.
//! - Every gateway call takes an explicit store handle.
//! - Payload checks produce a field → message map instead of failing fast.
//! - Role checks are plain predicates evaluated before any persistence work.

pub mod auth;
pub mod authz;
pub mod domain;
pub mod errors;
pub mod gateway;
pub mod validation;
#[cfg(test)]
pub mod test_support;
