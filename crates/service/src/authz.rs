//! Role-based authorization guard evaluated before any persistence work.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    OwnerAdmin,
    VetAdmin,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::OwnerAdmin, Role::VetAdmin, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::OwnerAdmin => "OWNER_ADMIN",
            Role::VetAdmin => "VET_ADMIN",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts the bare name as well as the `ROLE_`-prefixed authority form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.strip_prefix("ROLE_").unwrap_or(name);
        match name {
            "OWNER_ADMIN" => Ok(Role::OwnerAdmin),
            "VET_ADMIN" => Ok(Role::VetAdmin),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// What a caller must hold to pass the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePredicate {
    HasRole(Role),
    HasAnyRole(&'static [Role]),
}

impl RolePredicate {
    pub fn is_satisfied_by(&self, roles: &BTreeSet<Role>) -> bool {
        match self {
            RolePredicate::HasRole(r) => roles.contains(r),
            RolePredicate::HasAnyRole(any) => any.iter().any(|r| roles.contains(r)),
        }
    }
}

impl fmt::Display for RolePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RolePredicate::HasRole(r) => write!(f, "role {r} required"),
            RolePredicate::HasAnyRole(any) => {
                let names: Vec<&str> = any.iter().map(Role::as_str).collect();
                write!(f, "one of [{}] required", names.join(", "))
            }
        }
    }
}

/// `Forbidden` unless `roles` satisfies `predicate`.
pub fn authorize(roles: &BTreeSet<Role>, predicate: &RolePredicate) -> Result<(), ServiceError> {
    if predicate.is_satisfied_by(roles) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(predicate.to_string()))
    }
}

/// Route predicates, one per resource and access kind.
pub mod policy {
    use super::{Role, RolePredicate};

    pub const PET_TYPES_READ: RolePredicate = RolePredicate::HasAnyRole(&[Role::OwnerAdmin, Role::VetAdmin]);
    pub const PET_TYPES_WRITE: RolePredicate = RolePredicate::HasRole(Role::VetAdmin);
    pub const VET_ADMIN: RolePredicate = RolePredicate::HasRole(Role::VetAdmin);
    pub const OWNER_ADMIN: RolePredicate = RolePredicate::HasRole(Role::OwnerAdmin);
    pub const USER_ADMIN: RolePredicate = RolePredicate::HasRole(Role::Admin);
}
