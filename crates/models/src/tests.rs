//! Schema and relation checks against a migrated in-memory SQLite database.
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, NotSet, QueryOrder, Set};

use crate::{db, owner, pet, pet_type, specialty, vet, vet_specialty, visit};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = db::connect_sqlite_memory().await?;
    db::migrate(&db).await?;
    Ok(db)
}

async fn seed_pet(db: &DatabaseConnection) -> Result<(owner::Model, pet_type::Model, pet::Model)> {
    let cat = pet_type::ActiveModel { id: NotSet, name: Set("cat".into()) }.insert(db).await?;
    let george = owner::ActiveModel {
        id: NotSet,
        first_name: Set("George".into()),
        last_name: Set("Franklin".into()),
        address: Set("110 W. Liberty St.".into()),
        city: Set("Madison".into()),
        telephone: Set("6085551023".into()),
    }
    .insert(db)
    .await?;
    let leo = pet::ActiveModel {
        id: NotSet,
        name: Set("Leo".into()),
        birth_date: Set(NaiveDate::from_ymd_opt(2010, 9, 7)),
        type_id: Set(cat.id),
        owner_id: Set(george.id),
    }
    .insert(db)
    .await?;
    Ok((george, cat, leo))
}

#[tokio::test]
async fn insert_assigns_sequential_ids() -> Result<()> {
    let db = setup_test_db().await?;
    let a = pet_type::ActiveModel { id: NotSet, name: Set("cat".into()) }.insert(&db).await?;
    let b = pet_type::ActiveModel { id: NotSet, name: Set("dog".into()) }.insert(&db).await?;
    assert!(b.id > a.id);
    Ok(())
}

#[tokio::test]
async fn owner_with_related_pets_in_one_query() -> Result<()> {
    let db = setup_test_db().await?;
    let (george, _cat, leo) = seed_pet(&db).await?;

    let rows = owner::Entity::find_by_id(george.id)
        .find_with_related(pet::Entity)
        .all(&db)
        .await?;
    assert_eq!(rows.len(), 1);
    let (found, pets) = &rows[0];
    assert_eq!(found.last_name, "Franklin");
    assert_eq!(pets, &vec![leo]);
    Ok(())
}

#[tokio::test]
async fn pet_resolves_type_and_visits() -> Result<()> {
    let db = setup_test_db().await?;
    let (_george, cat, leo) = seed_pet(&db).await?;
    visit::ActiveModel {
        id: NotSet,
        pet_id: Set(leo.id),
        visit_date: Set(NaiveDate::from_ymd_opt(2013, 1, 1).unwrap()),
        description: Set("rabies shot".into()),
    }
    .insert(&db)
    .await?;

    let pet_type = leo.find_related(pet_type::Entity).one(&db).await?;
    assert_eq!(pet_type, Some(cat));
    let visits = leo.find_related(visit::Entity).all(&db).await?;
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].description, "rabies shot");
    Ok(())
}

#[tokio::test]
async fn vet_specialties_many_to_many() -> Result<()> {
    let db = setup_test_db().await?;
    let linda = vet::ActiveModel { id: NotSet, first_name: Set("Linda".into()), last_name: Set("Douglas".into()) }
        .insert(&db)
        .await?;
    let surgery = specialty::ActiveModel { id: NotSet, name: Set("surgery".into()) }.insert(&db).await?;
    let dentistry = specialty::ActiveModel { id: NotSet, name: Set("dentistry".into()) }.insert(&db).await?;
    for s in [&surgery, &dentistry] {
        vet_specialty::ActiveModel { vet_id: Set(linda.id), specialty_id: Set(s.id) }
            .insert(&db)
            .await?;
    }

    let specialties = linda
        .find_related(specialty::Entity)
        .order_by_asc(specialty::Column::Name)
        .all(&db)
        .await?;
    assert_eq!(specialties, vec![dentistry, surgery.clone()]);

    let vets = surgery.find_related(vet::Entity).all(&db).await?;
    assert_eq!(vets, vec![linda]);
    Ok(())
}

#[tokio::test]
async fn pet_type_with_pets_cannot_be_deleted_directly() -> Result<()> {
    let db = setup_test_db().await?;
    let (_george, cat, _leo) = seed_pet(&db).await?;

    // No ON DELETE CASCADE: the FK must reject orphaning pets
    let res = pet_type::Entity::delete_by_id(cat.id).exec(&db).await;
    assert!(res.is_err());
    assert!(pet_type::Entity::find_by_id(cat.id).one(&db).await?.is_some());
    Ok(())
}
