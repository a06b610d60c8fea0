use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::{info, instrument};

use models::{owner, pet};

use super::{delete_pets_with_visits, identity_of, CascadeSummary};
use crate::domain::{Owner, Persistable, Pet};
use crate::errors::ServiceError;

/// Owners joined with their pets, each pet completed with type and visits.
async fn assemble<C: ConnectionTrait>(
    db: &C,
    mut rows: Vec<(owner::Model, Vec<pet::Model>)>,
) -> Result<Vec<Owner>, ServiceError> {
    rows.sort_by_key(|(o, _)| o.id);
    let mut all_pets: Vec<pet::Model> = rows.iter().flat_map(|(_, pets)| pets.iter().cloned()).collect();
    all_pets.sort_by_key(|p| p.id);

    let mut by_owner: HashMap<i32, Vec<Pet>> = HashMap::new();
    for p in super::pet::assemble(db, all_pets).await? {
        if let Some(owner_id) = p.owner_id {
            by_owner.entry(owner_id).or_default().push(p);
        }
    }
    Ok(rows
        .into_iter()
        .map(|(o, _)| {
            let pets = by_owner.remove(&o.id).unwrap_or_default();
            Owner::from_parts(o, pets)
        })
        .collect())
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Owner, ServiceError> {
    let rows = owner::Entity::find_by_id(id).find_with_related(pet::Entity).all(db).await?;
    assemble(db, rows)
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found(Owner::KIND, id))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Owner>, ServiceError> {
    let rows = owner::Entity::find()
        .order_by_asc(owner::Column::Id)
        .find_with_related(pet::Entity)
        .all(db)
        .await?;
    assemble(db, rows).await
}

/// Owners whose last name starts with `prefix` (case-sensitive `LIKE 'prefix%'`).
#[instrument(skip(db))]
pub async fn find_by_last_name<C: ConnectionTrait>(db: &C, prefix: &str) -> Result<Vec<Owner>, ServiceError> {
    let rows = owner::Entity::find()
        .filter(owner::Column::LastName.starts_with(prefix))
        .order_by_asc(owner::Column::Id)
        .find_with_related(pet::Entity)
        .all(db)
        .await?;
    assemble(db, rows).await
}

/// Stores the owner's own fields. Pets are saved through the pet gateway.
#[instrument(skip(db, entity), fields(id = ?entity.id))]
pub async fn save<C: ConnectionTrait>(db: &C, entity: &Owner) -> Result<Owner, ServiceError> {
    match entity.id {
        None => {
            let m = owner::ActiveModel {
                id: NotSet,
                first_name: Set(entity.first_name.clone()),
                last_name: Set(entity.last_name.clone()),
                address: Set(entity.address.clone()),
                city: Set(entity.city.clone()),
                telephone: Set(entity.telephone.clone()),
            }
            .insert(db)
            .await?;
            info!(id = m.id, "owner_created");
            Ok(Owner::from_parts(m, Vec::new()))
        }
        Some(id) => {
            let mut am: owner::ActiveModel = owner::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found(Owner::KIND, id))?
                .into();
            am.first_name = Set(entity.first_name.clone());
            am.last_name = Set(entity.last_name.clone());
            am.address = Set(entity.address.clone());
            am.city = Set(entity.city.clone());
            am.telephone = Set(entity.telephone.clone());
            let m = am.update(db).await?;
            info!(id = m.id, "owner_updated");
            find_by_id(db, m.id).await
        }
    }
}

/// Removes the owner after every visit and pet it owns.
#[instrument(skip(db, entity), fields(id = ?entity.id))]
pub async fn delete<C>(db: &C, entity: &Owner) -> Result<CascadeSummary, ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let id = identity_of(entity)?;
    let txn = db.begin().await?;
    if owner::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(Owner::KIND, id));
    }
    let pet_ids: Vec<i32> = pet::Entity::find()
        .select_only()
        .column(pet::Column::Id)
        .filter(pet::Column::OwnerId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;
    let summary = delete_pets_with_visits(&txn, &pet_ids).await?;
    owner::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id, pets = summary.pets, visits = summary.visits, "owner_deleted");
    Ok(summary)
}
