//! Create `profile_pictures` (one per user) and `clinic_pictures` (many per clinic).
//!
//! Both hold the stored file name in `image_url`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProfilePictures::Table)
                    .if_not_exists()
                    .col(pk_auto(ProfilePictures::Id))
                    .col(integer_uniq(ProfilePictures::UserId))
                    .col(string_len(ProfilePictures::ImageUrl, 255))
                    .col(timestamp_with_time_zone(ProfilePictures::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_pictures_user")
                            .from(ProfilePictures::Table, ProfilePictures::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClinicPictures::Table)
                    .if_not_exists()
                    .col(pk_auto(ClinicPictures::Id))
                    .col(integer(ClinicPictures::ClinicId))
                    .col(string_len(ClinicPictures::ImageUrl, 255))
                    .col(timestamp_with_time_zone(ClinicPictures::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clinic_pictures_clinic")
                            .from(ClinicPictures::Table, ClinicPictures::ClinicId)
                            .to(Clinics::Table, Clinics::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ClinicPictures::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ProfilePictures::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProfilePictures { Table, Id, UserId, ImageUrl, CreatedAt }

#[derive(DeriveIden)]
enum ClinicPictures { Table, Id, ClinicId, ImageUrl, CreatedAt }

#[derive(DeriveIden)]
enum Users { Table, Id }

#[derive(DeriveIden)]
enum Clinics { Table, Id }
