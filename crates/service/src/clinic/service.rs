use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::domain::Caller;
use crate::authz::{ensure_owner, validate_id};
use crate::clinic::repository::ClinicRepository;
use crate::errors::ServiceError;
use crate::picture::{ImageKind, ImageStore};
use models::clinic::{self, ClinicFields};

/// Application service encapsulating clinic business rules.
/// Mutations load the clinic first (missing → not found) and only then
/// compare its owner with the caller.
pub struct ClinicService<R: ClinicRepository> {
    repo: Arc<R>,
    images: ImageStore,
}

impl<R: ClinicRepository> ClinicService<R> {
    pub fn new(repo: Arc<R>, images: ImageStore) -> Self { Self { repo, images } }

    pub async fn list_mine(&self, caller: &Caller) -> Result<Vec<clinic::Model>, ServiceError> {
        self.repo.list_by_owner(caller.id).await
    }

    pub async fn get(&self, id: i32) -> Result<clinic::Model, ServiceError> {
        let id = validate_id(id, "clinic_id")?;
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("clinic"))
    }

    #[instrument(skip(self, fields), fields(user_id = caller.id, title = %fields.title))]
    pub async fn create(&self, caller: &Caller, fields: ClinicFields) -> Result<clinic::Model, ServiceError> {
        let created = self.repo.create(caller.id, fields).await?;
        info!(clinic_id = created.id, owner_id = created.owner_id, "clinic_created");
        Ok(created)
    }

    #[instrument(skip(self, fields), fields(user_id = caller.id))]
    pub async fn update(&self, caller: &Caller, id: i32, fields: ClinicFields) -> Result<clinic::Model, ServiceError> {
        let existing = self.get(id).await?;
        ensure_owner(existing.owner_id, caller, "clinic")?;
        let updated = self.repo.update(existing.id, fields).await?;
        info!(clinic_id = updated.id, "clinic_updated");
        Ok(updated)
    }

    /// Remove the clinic, its picture rows and then their files.
    #[instrument(skip(self), fields(user_id = caller.id))]
    pub async fn delete(&self, caller: &Caller, id: i32) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        ensure_owner(existing.owner_id, caller, "clinic")?;
        let files = self
            .repo
            .delete_cascade(existing.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("clinic"))?;
        self.images.remove_all(ImageKind::Clinic, &files).await;
        info!(clinic_id = existing.id, pictures = files.len(), "clinic_deleted");
        Ok(())
    }
}
