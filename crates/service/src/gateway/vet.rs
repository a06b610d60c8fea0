use std::collections::BTreeMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use models::{specialty, vet, vet_specialty};

use super::identity_of;
use crate::domain::{Persistable, Specialty, Vet};
use crate::errors::ServiceError;
use crate::validation::Violations;

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Vet, ServiceError> {
    vet::Entity::find_by_id(id)
        .find_with_related(specialty::Entity)
        .all(db)
        .await?
        .into_iter()
        .next()
        .map(|(v, specialties)| Vet::from_parts(v, specialties))
        .ok_or_else(|| ServiceError::not_found(Vet::KIND, id))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Vet>, ServiceError> {
    let mut rows = vet::Entity::find()
        .order_by_asc(vet::Column::Id)
        .find_with_related(specialty::Entity)
        .all(db)
        .await?;
    rows.sort_by_key(|(v, _)| v.id);
    Ok(rows.into_iter().map(|(v, specialties)| Vet::from_parts(v, specialties)).collect())
}

/// Stores the vet row and replaces its specialty links.
///
/// Each referenced specialty is resolved by id, falling back to its name; an
/// unresolved reference fails validation on `specialties` and nothing is
/// written.
#[instrument(skip(db, entity), fields(id = ?entity.id, specialties = entity.specialties.len()))]
pub async fn save<C>(db: &C, entity: &Vet) -> Result<Vet, ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let specialties = resolve_specialties(&txn, &entity.specialties).await?;

    let row = match entity.id {
        None => {
            vet::ActiveModel {
                id: NotSet,
                first_name: Set(entity.first_name.clone()),
                last_name: Set(entity.last_name.clone()),
            }
            .insert(&txn)
            .await?
        }
        Some(id) => {
            let mut am: vet::ActiveModel = vet::Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or_else(|| ServiceError::not_found(Vet::KIND, id))?
                .into();
            am.first_name = Set(entity.first_name.clone());
            am.last_name = Set(entity.last_name.clone());
            am.update(&txn).await?
        }
    };

    vet_specialty::Entity::delete_many()
        .filter(vet_specialty::Column::VetId.eq(row.id))
        .exec(&txn)
        .await?;
    if !specialties.is_empty() {
        let links = specialties.iter().map(|s| vet_specialty::ActiveModel {
            vet_id: Set(row.id),
            specialty_id: Set(s.id),
        });
        vet_specialty::Entity::insert_many(links).exec_without_returning(&txn).await?;
    }
    txn.commit().await?;

    info!(id = row.id, specialties = specialties.len(), "vet_saved");
    Ok(Vet::from_parts(row, specialties))
}

/// Removes the vet after dropping its specialty links.
#[instrument(skip(db, entity), fields(id = ?entity.id))]
pub async fn delete<C>(db: &C, entity: &Vet) -> Result<(), ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let id = identity_of(entity)?;
    let txn = db.begin().await?;
    if vet::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(Vet::KIND, id));
    }
    vet_specialty::Entity::delete_many()
        .filter(vet_specialty::Column::VetId.eq(id))
        .exec(&txn)
        .await?;
    vet::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id, "vet_deleted");
    Ok(())
}

/// Distinct stored specialties for the references, keyed by id.
async fn resolve_specialties<C: ConnectionTrait>(
    db: &C,
    refs: &[Specialty],
) -> Result<Vec<specialty::Model>, ServiceError> {
    let mut resolved: BTreeMap<i32, specialty::Model> = BTreeMap::new();
    let mut violations = Violations::new();
    for r in refs {
        let by_id = match r.id {
            Some(id) => specialty::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let found = match by_id {
            Some(m) => Some(m),
            None if !r.name.trim().is_empty() => super::specialty::row_by_name(db, &r.name).await?,
            None => None,
        };
        match found {
            Some(m) => {
                resolved.insert(m.id, m);
            }
            None => {
                debug!(id = ?r.id, name = %r.name, "specialty_unresolved");
                violations.add("specialties", format!("unknown specialty {}", describe(r)));
            }
        }
    }
    violations.into_result()?;
    Ok(resolved.into_values().collect())
}

fn describe(r: &Specialty) -> String {
    match r.id {
        Some(id) if r.name.is_empty() => id.to_string(),
        _ => r.name.clone(),
    }
}
