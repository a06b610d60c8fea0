#![cfg(test)]
//! Fresh migrated in-memory databases and small fixtures for gateway tests.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::domain::{Owner, Pet, PetType, Visit};
use crate::gateway;

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_sqlite_memory().await?;
    models::db::migrate(&db).await?;
    Ok(db)
}

pub async fn pet_type(db: &DatabaseConnection, name: &str) -> Result<PetType, anyhow::Error> {
    Ok(gateway::pet_type::save(db, &PetType { id: None, name: name.into() }).await?)
}

pub async fn owner(db: &DatabaseConnection, first: &str, last: &str) -> Result<Owner, anyhow::Error> {
    let owner = Owner {
        first_name: first.into(),
        last_name: last.into(),
        address: "110 W. Liberty St.".into(),
        city: "Madison".into(),
        telephone: "6085551023".into(),
        ..Owner::default()
    };
    Ok(gateway::owner::save(db, &owner).await?)
}

pub async fn pet(db: &DatabaseConnection, owner: &Owner, pet_type: &PetType, name: &str) -> Result<Pet, anyhow::Error> {
    let pet = Pet {
        name: name.into(),
        birth_date: NaiveDate::from_ymd_opt(2010, 9, 7),
        pet_type: Some(pet_type.clone()),
        owner_id: owner.id,
        ..Pet::default()
    };
    Ok(gateway::pet::save(db, &pet).await?)
}

pub async fn visit(db: &DatabaseConnection, pet: &Pet, description: &str) -> Result<Visit, anyhow::Error> {
    let visit = Visit {
        date: NaiveDate::from_ymd_opt(2013, 1, 1),
        description: description.into(),
        pet_id: pet.id,
        ..Visit::default()
    };
    Ok(gateway::visit::save(db, &visit).await?)
}
