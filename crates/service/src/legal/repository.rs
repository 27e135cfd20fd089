use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};

use crate::errors::ServiceError;
use models::legal_information::{self, LegalFields};
use models::user;

#[async_trait]
pub trait LegalRepository: Send + Sync {
    async fn get(&self, owner_id: i32) -> Result<Option<legal_information::Model>, ServiceError>;
    async fn upsert(&self, owner_id: i32, fields: LegalFields) -> Result<legal_information::Model, ServiceError>;
    async fn delete(&self, owner_id: i32) -> Result<bool, ServiceError>;
}

#[derive(Clone)]
pub struct SeaOrmLegalRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmLegalRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl LegalRepository for SeaOrmLegalRepository {
    async fn get(&self, owner_id: i32) -> Result<Option<legal_information::Model>, ServiceError> {
        Ok(legal_information::find_by_owner(&self.db, owner_id).await?)
    }

    async fn upsert(&self, owner_id: i32, fields: LegalFields) -> Result<legal_information::Model, ServiceError> {
        let txn = self.db.begin().await?;
        if user::Entity::find_by_id(owner_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Err(ServiceError::not_found("user"));
        }
        let saved = legal_information::upsert(&txn, owner_id, fields).await?;
        txn.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, owner_id: i32) -> Result<bool, ServiceError> {
        Ok(legal_information::delete_by_owner(&self.db, owner_id).await?)
    }
}
