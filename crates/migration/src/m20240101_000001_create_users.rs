//! Create `users` table.
//!
//! Email and mobile number are each unique; the password is stored as an
//! argon2 PHC string.
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
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::FullName, 128))
                    .col(string_len_uniq(Users::Email, 255))
                    .col(string_len_uniq(Users::MobileNumber, 32))
                    .col(string_len(Users::HashedPassword, 255))
                    .col(string_len(Users::Role, 32))
                    .col(boolean(Users::IsActive).default(true))
                    .col(timestamp_with_time_zone(Users::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Id, FullName, Email, MobileNumber, HashedPassword, Role, IsActive, CreatedAt }
