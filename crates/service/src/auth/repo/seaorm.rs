use sea_orm::{DatabaseConnection, EntityTrait};

use crate::auth::domain::{AuthUser, Credentials, NewAccount};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::user;

#[derive(Clone)]
pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(user::find_by_email(&self.db, email).await?.map(AuthUser::from))
    }

    async fn find_user_by_email_or_mobile(&self, email: &str, mobile_number: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(user::find_by_email_or_mobile(&self.db, email, mobile_number).await?.map(AuthUser::from))
    }

    async fn create_user(&self, account: NewAccount) -> Result<AuthUser, AuthError> {
        let created = user::create(
            &self.db,
            user::NewUser {
                full_name: account.full_name,
                email: account.email,
                mobile_number: account.mobile_number,
                hashed_password: account.password_hash,
                role: account.role,
            },
        )
        .await?;
        Ok(created.into())
    }

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
        let res = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| Credentials { user_id: u.id, password_hash: u.hashed_password }))
    }

    async fn update_password(&self, user_id: i32, password_hash: String) -> Result<(), AuthError> {
        user::update_password_hash(&self.db, user_id, password_hash).await?;
        Ok(())
    }
}
