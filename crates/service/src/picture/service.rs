use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::auth::domain::Caller;
use crate::authz::{ensure_owner, validate_id};
use crate::errors::ServiceError;
use crate::picture::repository::PictureRepository;
use crate::picture::storage::{ImageKind, ImageStore, StoredImage, UploadedImage};
use models::{clinic_picture, profile_picture};

/// Picture uploads, lookups and removals.
///
/// Files are written before their rows; when the row write fails the files
/// just written are removed again. Deleting a row removes its file after the
/// row is gone.
pub struct PictureService<R: PictureRepository> {
    repo: Arc<R>,
    store: ImageStore,
}

impl<R: PictureRepository> PictureService<R> {
    pub fn new(repo: Arc<R>, store: ImageStore) -> Self { Self { repo, store } }

    /// Set or replace the caller's profile picture.
    #[instrument(skip(self, image), fields(user_id = caller.id))]
    pub async fn upload_profile_picture(&self, caller: &Caller, image: UploadedImage) -> Result<profile_picture::Model, ServiceError> {
        // a token can outlive its account
        if !self.repo.user_exists(caller.id).await? {
            return Err(ServiceError::not_found("user"));
        }
        let name = self.store.store(ImageKind::Profile, &image).await?;
        let (row, previous) = match self.repo.set_profile_picture(caller.id, &name).await {
            Ok(saved) => saved,
            Err(e) => {
                self.store.remove(ImageKind::Profile, &name).await;
                return Err(e);
            }
        };
        if let Some(old) = previous.filter(|old| *old != name) {
            self.store.remove(ImageKind::Profile, &old).await;
        }
        info!(user_id = caller.id, picture_id = row.id, file = %row.image_url, "profile_picture_saved");
        Ok(row)
    }

    pub async fn profile_picture(&self, caller: &Caller) -> Result<profile_picture::Model, ServiceError> {
        self.repo
            .profile_picture_of(caller.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("profile picture"))
    }

    pub async fn profile_image(&self, file_name: &str) -> Result<StoredImage, ServiceError> {
        self.store.read(ImageKind::Profile, file_name).await
    }

    #[instrument(skip(self), fields(user_id = caller.id))]
    pub async fn delete_profile_picture(&self, caller: &Caller, id: i32) -> Result<(), ServiceError> {
        let id = validate_id(id, "picture_id")?;
        let row = self
            .repo
            .get_profile_picture(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("profile picture"))?;
        ensure_owner(row.user_id, caller, "profile picture")?;
        if !self.repo.delete_profile_picture(id).await? {
            return Err(ServiceError::not_found("profile picture"));
        }
        self.store.remove(ImageKind::Profile, &row.image_url).await;
        info!(user_id = caller.id, picture_id = id, "profile_picture_deleted");
        Ok(())
    }

    /// Attach images to a clinic the caller owns. Every file is checked
    /// before any is written.
    #[instrument(skip(self, images), fields(user_id = caller.id, count = images.len()))]
    pub async fn add_clinic_pictures(
        &self,
        caller: &Caller,
        clinic_id: i32,
        images: Vec<UploadedImage>,
    ) -> Result<Vec<clinic_picture::Model>, ServiceError> {
        let clinic_id = validate_id(clinic_id, "clinic_id")?;
        if images.is_empty() {
            return Err(ServiceError::Validation("at least one image is required".into()));
        }
        let clinic = self
            .repo
            .find_clinic(clinic_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("clinic"))?;
        ensure_owner(clinic.owner_id, caller, "clinic")?;

        let names = self.store.store_all(ImageKind::Clinic, &images).await?;
        match self.repo.add_clinic_pictures(clinic_id, &names).await {
            Ok(rows) => {
                info!(clinic_id, count = rows.len(), "clinic_pictures_added");
                Ok(rows)
            }
            Err(e) => {
                warn!(clinic_id, error = %e, "clinic picture rows not saved; removing files");
                self.store.remove_all(ImageKind::Clinic, &names).await;
                Err(e)
            }
        }
    }

    pub async fn clinic_pictures(&self, clinic_id: i32) -> Result<Vec<clinic_picture::Model>, ServiceError> {
        let clinic_id = validate_id(clinic_id, "clinic_id")?;
        if self.repo.find_clinic(clinic_id).await?.is_none() {
            return Err(ServiceError::not_found("clinic"));
        }
        self.repo.list_clinic_pictures(clinic_id).await
    }

    pub async fn clinic_image(&self, file_name: &str) -> Result<StoredImage, ServiceError> {
        self.store.read(ImageKind::Clinic, file_name).await
    }

    #[instrument(skip(self), fields(user_id = caller.id))]
    pub async fn delete_clinic_picture(&self, caller: &Caller, id: i32) -> Result<(), ServiceError> {
        let id = validate_id(id, "picture_id")?;
        let row = self
            .repo
            .get_clinic_picture(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("clinic picture"))?;
        let clinic = self
            .repo
            .find_clinic(row.clinic_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("clinic"))?;
        ensure_owner(clinic.owner_id, caller, "clinic")?;
        if !self.repo.delete_clinic_picture(id).await? {
            return Err(ServiceError::not_found("clinic picture"));
        }
        self.store.remove(ImageKind::Clinic, &row.image_url).await;
        info!(clinic_id = clinic.id, picture_id = id, "clinic_picture_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::repository::SeaOrmPictureRepository;
    use crate::test_support::{clinic_fields, files_in, get_db, image, seed_user};

    async fn setup() -> anyhow::Result<(sea_orm::DatabaseConnection, tempfile::TempDir, PictureService<SeaOrmPictureRepository>)> {
        let db = get_db().await?;
        let dir = tempfile::tempdir()?;
        let svc = PictureService::new(Arc::new(SeaOrmPictureRepository::new(db.clone())), ImageStore::new(dir.path()));
        Ok((db, dir, svc))
    }

    #[tokio::test]
    async fn profile_picture_replace_removes_old_file() -> anyhow::Result<()> {
        let (db, dir, svc) = setup().await?;
        let alice = seed_user(&db, "alice", "doctor").await?;

        let first = svc.upload_profile_picture(&alice, image("me.png", "image/png")).await?;
        let second = svc.upload_profile_picture(&alice, image("me2.jpg", "image/jpeg")).await?;
        assert_eq!(first.id, second.id);
        assert!(second.image_url.ends_with(".jpg"));
        assert_eq!(files_in(&dir.path().join("profile_pictures")), 1);

        let current = svc.profile_picture(&alice).await?;
        assert_eq!(current.image_url, second.image_url);
        let served = svc.profile_image(&second.image_url).await?;
        assert_eq!(served.content_type, "image/jpeg");
        assert!(matches!(svc.profile_image(&first.image_url).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn profile_picture_delete_checks_owner() -> anyhow::Result<()> {
        let (db, dir, svc) = setup().await?;
        let alice = seed_user(&db, "alice", "doctor").await?;
        let bob = seed_user(&db, "bob", "patient").await?;
        let pic = svc.upload_profile_picture(&alice, image("me.png", "image/png")).await?;

        assert!(matches!(svc.delete_profile_picture(&bob, pic.id).await, Err(ServiceError::Authorization(_))));
        assert!(matches!(svc.delete_profile_picture(&bob, 999).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_profile_picture(&bob, 0).await, Err(ServiceError::Validation(_))));

        svc.delete_profile_picture(&alice, pic.id).await?;
        assert_eq!(files_in(&dir.path().join("profile_pictures")), 0);
        assert!(matches!(svc.profile_picture(&alice).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn non_image_upload_rejected_before_any_write() -> anyhow::Result<()> {
        let (db, dir, svc) = setup().await?;
        let alice = seed_user(&db, "alice", "doctor").await?;
        let clinic = models::clinic::create(&db, alice.id, "Dr alice", clinic_fields("North")).await?;

        let res = svc
            .add_clinic_pictures(&alice, clinic.id, vec![image("a.png", "image/png"), image("cv.pdf", "application/pdf")])
            .await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert_eq!(files_in(&dir.path().join("clinic_pictures")), 0);
        assert!(svc.clinic_pictures(clinic.id).await?.is_empty());

        let res = svc.upload_profile_picture(&alice, image("notes.txt", "text/plain")).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert_eq!(files_in(&dir.path().join("profile_pictures")), 0);
        Ok(())
    }

    #[tokio::test]
    async fn clinic_pictures_are_owner_scoped() -> anyhow::Result<()> {
        let (db, dir, svc) = setup().await?;
        let alice = seed_user(&db, "alice", "doctor").await?;
        let bob = seed_user(&db, "bob", "doctor").await?;
        let clinic = models::clinic::create(&db, alice.id, "Dr alice", clinic_fields("North")).await?;

        let denied = svc.add_clinic_pictures(&bob, clinic.id, vec![image("a.png", "image/png")]).await;
        assert!(matches!(denied, Err(ServiceError::Authorization(_))));
        let missing = svc.add_clinic_pictures(&alice, 4242, vec![image("a.png", "image/png")]).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let rows = svc
            .add_clinic_pictures(&alice, clinic.id, vec![image("a.png", "image/png"), image("b.gif", "image/gif")])
            .await?;
        assert_eq!(rows.len(), 2);
        assert_eq!(files_in(&dir.path().join("clinic_pictures")), 2);
        assert_eq!(svc.clinic_pictures(clinic.id).await?.len(), 2);

        assert!(matches!(svc.delete_clinic_picture(&bob, rows[0].id).await, Err(ServiceError::Authorization(_))));
        svc.delete_clinic_picture(&alice, rows[0].id).await?;
        assert_eq!(files_in(&dir.path().join("clinic_pictures")), 1);
        assert!(matches!(svc.delete_clinic_picture(&alice, rows[0].id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn profile_upload_for_removed_account_is_not_found() -> anyhow::Result<()> {
        let (db, dir, svc) = setup().await?;
        let alice = seed_user(&db, "alice", "doctor").await?;
        models::user::hard_delete(&db, alice.id).await?;

        let res = svc.upload_profile_picture(&alice, image("me.png", "image/png")).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(files_in(&dir.path().join("profile_pictures")), 0);
        Ok(())
    }
}
