//! Create `clinics` table with FK to `users` (owner).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clinics::Table)
                    .if_not_exists()
                    .col(pk_auto(Clinics::Id))
                    .col(integer(Clinics::OwnerId))
                    .col(string_len(Clinics::OwnerName, 128))
                    .col(string(Clinics::Title))
                    .col(text(Clinics::Description))
                    .col(string(Clinics::Address))
                    .col(string(Clinics::City))
                    .col(string(Clinics::Province))
                    .col(string(Clinics::Country))
                    .col(string(Clinics::OwnerContact))
                    .col(string(Clinics::OperatingHours))
                    .col(string(Clinics::NoOfShifts))
                    .col(string(Clinics::ClinicSpeciality))
                    .col(string(Clinics::ClinicSubSpeciality))
                    .col(string(Clinics::StaffType))
                    .col(timestamp_with_time_zone(Clinics::RegistrationDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clinics_owner")
                            .from(Clinics::Table, Clinics::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Clinics::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Clinics {
    Table,
    Id,
    OwnerId,
    OwnerName,
    Title,
    Description,
    Address,
    City,
    Province,
    Country,
    OwnerContact,
    OperatingHours,
    NoOfShifts,
    ClinicSpeciality,
    ClinicSubSpeciality,
    StaffType,
    RegistrationDate,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
