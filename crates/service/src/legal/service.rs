use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::domain::Caller;
use crate::errors::ServiceError;
use crate::legal::repository::LegalRepository;
use models::legal_information::{self, LegalFields};

/// The caller's own legal record; there is no cross-user access.
pub struct LegalService<R: LegalRepository> {
    repo: Arc<R>,
}

impl<R: LegalRepository> LegalService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get(&self, caller: &Caller) -> Result<legal_information::Model, ServiceError> {
        self.repo
            .get(caller.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("legal information"))
    }

    /// Create or fully replace.
    #[instrument(skip(self, fields), fields(user_id = caller.id))]
    pub async fn put(&self, caller: &Caller, fields: LegalFields) -> Result<legal_information::Model, ServiceError> {
        let saved = self.repo.upsert(caller.id, fields).await?;
        info!(user_id = caller.id, legal_id = saved.id, "legal_information_saved");
        Ok(saved)
    }

    #[instrument(skip(self), fields(user_id = caller.id))]
    pub async fn delete(&self, caller: &Caller) -> Result<(), ServiceError> {
        if !self.repo.delete(caller.id).await? {
            return Err(ServiceError::not_found("legal information"));
        }
        info!(user_id = caller.id, "legal_information_deleted");
        Ok(())
    }
}
