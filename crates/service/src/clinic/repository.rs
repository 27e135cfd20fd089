use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};

use crate::errors::ServiceError;
use models::clinic::{self, ClinicFields};
use models::{clinic_picture, user};

#[async_trait]
pub trait ClinicRepository: Send + Sync {
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<clinic::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<clinic::Model>, ServiceError>;
    /// Insert bound to `owner_id`; the owner's current name is copied in.
    async fn create(&self, owner_id: i32, fields: ClinicFields) -> Result<clinic::Model, ServiceError>;
    async fn update(&self, id: i32, fields: ClinicFields) -> Result<clinic::Model, ServiceError>;
    /// Delete the clinic and its picture rows together. Returns the picture
    /// file names that were attached, or `None` when the clinic was absent.
    async fn delete_cascade(&self, id: i32) -> Result<Option<Vec<String>>, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmClinicRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmClinicRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ClinicRepository for SeaOrmClinicRepository {
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<clinic::Model>, ServiceError> {
        Ok(clinic::find_by_owner(&self.db, owner_id).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<clinic::Model>, ServiceError> {
        Ok(clinic::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, owner_id: i32, fields: ClinicFields) -> Result<clinic::Model, ServiceError> {
        let owner = user::Entity::find_by_id(owner_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        Ok(clinic::create(&self.db, owner.id, &owner.full_name, fields).await?)
    }

    async fn update(&self, id: i32, fields: ClinicFields) -> Result<clinic::Model, ServiceError> {
        Ok(clinic::replace_fields(&self.db, id, fields).await?)
    }

    async fn delete_cascade(&self, id: i32) -> Result<Option<Vec<String>>, ServiceError> {
        let txn = self.db.begin().await?;
        let files = clinic_picture::file_names_for_clinics(&txn, &[id]).await?;
        clinic_picture::delete_by_clinics(&txn, &[id]).await?;
        if !clinic::hard_delete(&txn, id).await? {
            txn.rollback().await?;
            return Ok(None);
        }
        txn.commit().await?;
        Ok(Some(files))
    }
}
