use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};

use crate::errors::ServiceError;
use models::{clinic, clinic_picture, profile_picture, user};

#[async_trait]
pub trait PictureRepository: Send + Sync {
    async fn find_clinic(&self, clinic_id: i32) -> Result<Option<clinic::Model>, ServiceError>;

    /// Insert one row per file name, all or nothing.
    async fn add_clinic_pictures(&self, clinic_id: i32, file_names: &[String]) -> Result<Vec<clinic_picture::Model>, ServiceError>;
    async fn list_clinic_pictures(&self, clinic_id: i32) -> Result<Vec<clinic_picture::Model>, ServiceError>;
    async fn get_clinic_picture(&self, id: i32) -> Result<Option<clinic_picture::Model>, ServiceError>;
    async fn delete_clinic_picture(&self, id: i32) -> Result<bool, ServiceError>;

    async fn user_exists(&self, user_id: i32) -> Result<bool, ServiceError>;
    async fn profile_picture_of(&self, user_id: i32) -> Result<Option<profile_picture::Model>, ServiceError>;
    async fn get_profile_picture(&self, id: i32) -> Result<Option<profile_picture::Model>, ServiceError>;
    /// Returns the saved row and the file name it replaced.
    async fn set_profile_picture(&self, user_id: i32, file_name: &str) -> Result<(profile_picture::Model, Option<String>), ServiceError>;
    async fn delete_profile_picture(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmPictureRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPictureRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl PictureRepository for SeaOrmPictureRepository {
    async fn find_clinic(&self, clinic_id: i32) -> Result<Option<clinic::Model>, ServiceError> {
        Ok(clinic::Entity::find_by_id(clinic_id).one(&self.db).await?)
    }

    async fn add_clinic_pictures(&self, clinic_id: i32, file_names: &[String]) -> Result<Vec<clinic_picture::Model>, ServiceError> {
        let txn = self.db.begin().await?;
        let mut rows = Vec::with_capacity(file_names.len());
        for name in file_names {
            rows.push(clinic_picture::create(&txn, clinic_id, name).await?);
        }
        txn.commit().await?;
        Ok(rows)
    }

    async fn list_clinic_pictures(&self, clinic_id: i32) -> Result<Vec<clinic_picture::Model>, ServiceError> {
        Ok(clinic_picture::list_by_clinic(&self.db, clinic_id).await?)
    }

    async fn get_clinic_picture(&self, id: i32) -> Result<Option<clinic_picture::Model>, ServiceError> {
        Ok(clinic_picture::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn delete_clinic_picture(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(clinic_picture::hard_delete(&self.db, id).await?)
    }

    async fn user_exists(&self, user_id: i32) -> Result<bool, ServiceError> {
        Ok(user::Entity::find_by_id(user_id).one(&self.db).await?.is_some())
    }

    async fn profile_picture_of(&self, user_id: i32) -> Result<Option<profile_picture::Model>, ServiceError> {
        Ok(profile_picture::find_by_user(&self.db, user_id).await?)
    }

    async fn get_profile_picture(&self, id: i32) -> Result<Option<profile_picture::Model>, ServiceError> {
        Ok(profile_picture::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn set_profile_picture(&self, user_id: i32, file_name: &str) -> Result<(profile_picture::Model, Option<String>), ServiceError> {
        let txn = self.db.begin().await?;
        let saved = profile_picture::upsert(&txn, user_id, file_name).await?;
        txn.commit().await?;
        Ok(saved)
    }

    async fn delete_profile_picture(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(profile_picture::hard_delete(&self.db, id).await?)
    }
}
