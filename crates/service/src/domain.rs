//! Business view of the clinic entities, as exchanged over the REST API.
//!
//! `id` is `None` until the entity has been persisted once. Collections carry
//! `#[serde(default)]` and scalar text fields default to empty so that an
//! incomplete payload reaches validation instead of failing deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use models::{owner, pet, pet_type, specialty, vet, visit};

/// Something the gateway can persist: new until it carries an identity.
pub trait Persistable {
    /// Human-readable entity name used in not-found messages.
    const KIND: &'static str;

    fn id(&self) -> Option<i32>;

    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetType {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(default)]
    pub id: Option<i32>,
    /// Defaults to the current date when the visit is first saved.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pet_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, rename = "type")]
    pub pet_type: Option<PetType>,
    #[serde(default)]
    pub owner_id: Option<i32>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Treated as a set: duplicates collapse on save, reads are sorted by name.
    #[serde(default)]
    pub specialties: Vec<Specialty>,
}

macro_rules! persistable {
    ($ty:ty, $kind:literal) => {
        impl Persistable for $ty {
            const KIND: &'static str = $kind;
            fn id(&self) -> Option<i32> { self.id }
        }
    };
}

persistable!(PetType, "pet type");
persistable!(Specialty, "specialty");
persistable!(Visit, "visit");
persistable!(Pet, "pet");
persistable!(Owner, "owner");
persistable!(Vet, "vet");

impl From<pet_type::Model> for PetType {
    fn from(m: pet_type::Model) -> Self {
        Self { id: Some(m.id), name: m.name }
    }
}

impl From<specialty::Model> for Specialty {
    fn from(m: specialty::Model) -> Self {
        Self { id: Some(m.id), name: m.name }
    }
}

impl From<visit::Model> for Visit {
    fn from(m: visit::Model) -> Self {
        Self { id: Some(m.id), date: Some(m.visit_date), description: m.description, pet_id: Some(m.pet_id) }
    }
}

impl Pet {
    pub(crate) fn from_parts(m: pet::Model, pet_type: Option<pet_type::Model>, mut visits: Vec<visit::Model>) -> Self {
        visits.sort_by_key(|v| v.id);
        Self {
            id: Some(m.id),
            name: m.name,
            birth_date: m.birth_date,
            pet_type: pet_type.map(PetType::from),
            owner_id: Some(m.owner_id),
            visits: visits.into_iter().map(Visit::from).collect(),
        }
    }
}

impl Owner {
    pub(crate) fn from_parts(m: owner::Model, pets: Vec<Pet>) -> Self {
        Self {
            id: Some(m.id),
            first_name: m.first_name,
            last_name: m.last_name,
            address: m.address,
            city: m.city,
            telephone: m.telephone,
            pets,
        }
    }
}

impl Vet {
    pub(crate) fn from_parts(m: vet::Model, mut specialties: Vec<specialty::Model>) -> Self {
        specialties.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Self {
            id: Some(m.id),
            first_name: m.first_name,
            last_name: m.last_name,
            specialties: specialties.into_iter().map(Specialty::from).collect(),
        }
    }
}
