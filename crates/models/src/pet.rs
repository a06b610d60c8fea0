use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{owner, pet_type, visit};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub birth_date: Option<Date>,
    pub type_id: i32,
    pub owner_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { PetType, Owner, Visit }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::PetType => Entity::belongs_to(pet_type::Entity)
                .from(Column::TypeId)
                .to(pet_type::Column::Id)
                .into(),
            Relation::Owner => Entity::belongs_to(owner::Entity)
                .from(Column::OwnerId)
                .to(owner::Column::Id)
                .into(),
            Relation::Visit => Entity::has_many(visit::Entity).into(),
        }
    }
}

impl Related<pet_type::Entity> for Entity {
    fn to() -> RelationDef { Relation::PetType.def() }
}

impl Related<owner::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl Related<visit::Entity> for Entity {
    fn to() -> RelationDef { Relation::Visit.def() }
}

impl ActiveModelBehavior for ActiveModel {}
