//! Create `legal_information` table: regulatory identifiers, one row per user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LegalInformation::Table)
                    .if_not_exists()
                    .col(pk_auto(LegalInformation::Id))
                    .col(integer_uniq(LegalInformation::OwnerId))
                    .col(string_len(LegalInformation::LicenseNumber, 64))
                    .col(string_len(LegalInformation::TaxNumber, 64))
                    .col(string_len(LegalInformation::CommercialRegistry, 64))
                    .col(string_len(LegalInformation::IssuingAuthority, 128))
                    .col(timestamp_with_time_zone(LegalInformation::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_legal_information_owner")
                            .from(LegalInformation::Table, LegalInformation::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LegalInformation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum LegalInformation {
    Table,
    Id,
    OwnerId,
    LicenseNumber,
    TaxNumber,
    CommercialRegistry,
    IssuingAuthority,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
