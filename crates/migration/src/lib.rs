//! Migrator registering clinic tables in FK dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_types;
mod m20240101_000002_create_specialties;
mod m20240101_000003_create_vets;
mod m20240101_000004_create_owners;
mod m20240101_000005_create_pets;
mod m20240101_000006_create_visits;
mod m20240101_000007_create_users;
mod m20240101_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_types::Migration),
            Box::new(m20240101_000002_create_specialties::Migration),
            Box::new(m20240101_000003_create_vets::Migration),
            Box::new(m20240101_000004_create_owners::Migration),
            Box::new(m20240101_000005_create_pets::Migration),
            Box::new(m20240101_000006_create_visits::Migration),
            Box::new(m20240101_000007_create_users::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000008_add_indexes::Migration),
        ]
    }
}
