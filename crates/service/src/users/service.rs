use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::auth::domain::Caller;
use crate::authz::{require_role, validate_id};
use crate::errors::ServiceError;
use crate::picture::{ImageKind, ImageStore};
use crate::users::repository::UserRepository;
use models::user;

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserProfile {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<user::Model> for UserProfile {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            mobile_number: u.mobile_number,
            role: u.role,
            is_active: u.is_active,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    images: ImageStore,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>, images: ImageStore) -> Self { Self { repo, images } }

    pub async fn profile(&self, caller: &Caller) -> Result<UserProfile, ServiceError> {
        self.get(caller.id).await
    }

    pub async fn get(&self, id: i32) -> Result<UserProfile, ServiceError> {
        let id = validate_id(id, "user_id")?;
        self.repo
            .get(id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    /// Every user, admins only.
    pub async fn list_all(&self, caller: &Caller) -> Result<Vec<UserProfile>, ServiceError> {
        require_role(caller, user::ADMIN_ROLE)?;
        Ok(self.repo.list_all().await?.into_iter().map(UserProfile::from).collect())
    }

    /// Remove the caller's account and everything hanging off it.
    #[instrument(skip(self), fields(user_id = caller.id))]
    pub async fn delete_account(&self, caller: &Caller) -> Result<(), ServiceError> {
        let removed = self
            .repo
            .delete_cascade(caller.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        if let Some(profile) = &removed.profile {
            self.images.remove(ImageKind::Profile, profile).await;
        }
        self.images.remove_all(ImageKind::Clinic, &removed.clinic).await;
        info!(user_id = caller.id, clinic_pictures = removed.clinic.len(), "account_deleted");
        Ok(())
    }
}
