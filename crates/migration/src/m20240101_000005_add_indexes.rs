use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Clinics are listed by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_clinics_owner")
                    .table(Clinics::Table)
                    .col(Clinics::OwnerId)
                    .to_owned(),
            )
            .await?;

        // ClinicPictures are listed by clinic
        manager
            .create_index(
                Index::create()
                    .name("idx_clinic_pictures_clinic")
                    .table(ClinicPictures::Table)
                    .col(ClinicPictures::ClinicId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_clinic_pictures_clinic").table(ClinicPictures::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_clinics_owner").table(Clinics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clinics { Table, OwnerId }

#[derive(DeriveIden)]
enum ClinicPictures { Table, ClinicId }
