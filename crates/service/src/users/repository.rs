use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, TransactionTrait};

use crate::errors::ServiceError;
use models::{clinic, clinic_picture, legal_information, profile_picture, user};

/// Image files left behind by a removed account.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RemovedFiles {
    pub profile: Option<String>,
    pub clinic: Vec<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, id: i32) -> Result<Option<user::Model>, ServiceError>;
    async fn list_all(&self) -> Result<Vec<user::Model>, ServiceError>;
    /// Delete the user with every clinic, picture and legal row they own in
    /// one transaction. `None` when the user did not exist.
    async fn delete_cascade(&self, id: i32) -> Result<Option<RemovedFiles>, ServiceError>;
}

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn get(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list_all(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::list_all(&self.db).await?)
    }

    async fn delete_cascade(&self, id: i32) -> Result<Option<RemovedFiles>, ServiceError> {
        let txn = self.db.begin().await?;
        if user::Entity::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(None);
        }

        let clinic_ids: Vec<i32> = clinic::Entity::find()
            .select_only()
            .column(clinic::Column::Id)
            .filter(clinic::Column::OwnerId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;
        let removed = RemovedFiles {
            clinic: clinic_picture::file_names_for_clinics(&txn, &clinic_ids).await?,
            profile: profile_picture::find_by_user(&txn, id).await?.map(|p| p.image_url),
        };

        clinic_picture::delete_by_clinics(&txn, &clinic_ids).await?;
        clinic::Entity::delete_many().filter(clinic::Column::OwnerId.eq(id)).exec(&txn).await?;
        profile_picture::Entity::delete_many().filter(profile_picture::Column::UserId.eq(id)).exec(&txn).await?;
        legal_information::delete_by_owner(&txn, id).await?;
        user::hard_delete(&txn, id).await?;
        txn.commit().await?;
        Ok(Some(removed))
    }
}
