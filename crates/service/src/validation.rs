//! Constraint validation of inbound payloads.
//!
//! A payload is valid when [`Validate::validate`] returns no violations.
//! Messages follow the wording clients of the clinic API already match on.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::auth::domain::NewUser;
use crate::authz::Role;
use crate::domain::{Owner, Pet, PetType, Specialty, Vet, Visit};
use crate::errors::ServiceError;

pub const MUST_NOT_BE_BLANK: &str = "must not be blank";
pub const MUST_NOT_BE_NULL: &str = "must not be null";
pub const MUST_NOT_BE_EMPTY: &str = "must not be empty";
pub const TELEPHONE_DIGITS: &str = "numeric value out of bounds (<10 digits>.<0 digits> expected)";

const NAME_MAX_LEN: usize = 80;
const USERNAME_MAX_LEN: usize = 20;

/// Field path → message. One message per field; the first recorded wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations(BTreeMap<String, String>);

impl Violations {
    pub fn new() -> Self { Self::default() }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut v = Self::new();
        v.add(field, message);
        v
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn get(&self, field: &str) -> Option<&str> { self.0.get(field).map(String::as_str) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok` when empty, otherwise a [`ServiceError::Validation`].
    pub fn into_result(self) -> Result<(), ServiceError> {
        if self.is_empty() { Ok(()) } else { Err(ServiceError::Validation(self)) }
    }

    fn not_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, MUST_NOT_BE_BLANK);
        }
    }

    fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("size must be between 1 and {max}"));
        }
    }

    fn nested(&mut self, prefix: &str, inner: Violations) {
        for (field, message) in inner.0 {
            self.add(format!("{prefix}.{field}"), message);
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first { f.write_str("; ")?; }
            first = false;
            if field.is_empty() {
                f.write_str(message)?;
            } else {
                write!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

pub trait Validate {
    fn validate(&self) -> Violations;
}

impl Validate for PetType {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        v.not_blank("name", &self.name);
        v.max_len("name", &self.name, NAME_MAX_LEN);
        v
    }
}

impl Validate for Specialty {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        v.not_blank("name", &self.name);
        v.max_len("name", &self.name, NAME_MAX_LEN);
        v
    }
}

impl Validate for Owner {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        v.not_blank("firstName", &self.first_name);
        v.not_blank("lastName", &self.last_name);
        v.not_blank("address", &self.address);
        v.not_blank("city", &self.city);
        let t = self.telephone.as_str();
        if t.is_empty() || t.len() > 10 || !t.bytes().all(|b| b.is_ascii_digit()) {
            v.add("telephone", TELEPHONE_DIGITS);
        }
        v
    }
}

impl Validate for Pet {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        v.not_blank("name", &self.name);
        match &self.pet_type {
            None => v.add("type", MUST_NOT_BE_NULL),
            Some(t) if t.id.is_none() => v.add("type.id", MUST_NOT_BE_NULL),
            Some(_) => {}
        }
        for (i, visit) in self.visits.iter().enumerate() {
            v.nested(&format!("visits[{i}]"), visit.validate());
        }
        v
    }
}

impl Validate for Visit {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        v.not_blank("description", &self.description);
        v
    }
}

impl Validate for Vet {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        v.not_blank("firstName", &self.first_name);
        v.not_blank("lastName", &self.last_name);
        for (i, s) in self.specialties.iter().enumerate() {
            if s.id.is_none() && s.name.trim().is_empty() {
                v.add(format!("specialties[{i}]"), "must reference a specialty by id or name");
            }
        }
        v
    }
}

impl Validate for NewUser {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        v.not_blank("username", &self.username);
        v.max_len("username", &self.username, USERNAME_MAX_LEN);
        v.not_blank("password", &self.password);
        if self.roles.is_empty() {
            v.add("roles", MUST_NOT_BE_EMPTY);
        } else if self.roles.iter().any(|r| r.parse::<Role>().is_err()) {
            v.add("roles", "unknown role");
        }
        v
    }
}
