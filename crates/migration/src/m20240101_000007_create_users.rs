//! Create `users` and `roles`.
//!
//! Users are keyed by username; each role grant is one `roles` row.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string_len(Users::Username, 20).primary_key())
                    .col(string_len(Users::Password, 255).not_null())
                    .col(boolean(Users::Enabled).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(pk_auto(Roles::Id))
                    .col(string_len(Roles::Username, 20).not_null())
                    .col(string_len(Roles::Role, 20).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roles_users")
                            .from(Roles::Table, Roles::Username)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Roles::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Username, Password, Enabled }

#[derive(DeriveIden)]
enum Roles { Table, Id, Username, Role }
