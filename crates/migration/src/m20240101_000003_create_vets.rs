//! Create `vets` and the `vet_specialties` join table.
//!
//! The join table has a composite primary key and restricts deletes on both
//! sides; the service layer clears links before removing a vet or specialty.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vets::Table)
                    .if_not_exists()
                    .col(pk_auto(Vets::Id))
                    .col(string_len(Vets::FirstName, 30).not_null())
                    .col(string_len(Vets::LastName, 30).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VetSpecialties::Table)
                    .if_not_exists()
                    .col(integer(VetSpecialties::VetId).not_null())
                    .col(integer(VetSpecialties::SpecialtyId).not_null())
                    .primary_key(
                        Index::create()
                            .col(VetSpecialties::VetId)
                            .col(VetSpecialties::SpecialtyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vet_specialties_vets")
                            .from(VetSpecialties::Table, VetSpecialties::VetId)
                            .to(Vets::Table, Vets::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vet_specialties_specialties")
                            .from(VetSpecialties::Table, VetSpecialties::SpecialtyId)
                            .to(Specialties::Table, Specialties::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(VetSpecialties::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Vets::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vets { Table, Id, FirstName, LastName }

#[derive(DeriveIden)]
enum VetSpecialties { Table, VetId, SpecialtyId }

#[derive(DeriveIden)]
enum Specialties { Table, Id }
