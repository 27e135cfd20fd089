use async_trait::async_trait;

use super::domain::{AuthUser, Credentials, NewAccount};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_email_or_mobile(&self, email: &str, mobile_number: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, account: NewAccount) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError>;
    async fn update_password(&self, user_id: i32, password_hash: String) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<i32, AuthUser>>,      // key: user id
        creds: Mutex<HashMap<i32, Credentials>>,   // key: user id
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_user_by_email_or_mobile(&self, email: &str, mobile_number: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email || u.mobile_number == mobile_number).cloned())
        }

        async fn create_user(&self, account: NewAccount) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == account.email || u.mobile_number == account.mobile_number) {
                return Err(AuthError::Conflict);
            }
            let id = users.keys().max().copied().unwrap_or(0) + 1;
            let user = AuthUser {
                id,
                full_name: account.full_name,
                email: account.email,
                mobile_number: account.mobile_number,
                role: account.role,
                is_active: true,
            };
            users.insert(id, user.clone());
            self.creds.lock().unwrap().insert(id, Credentials { user_id: id, password_hash: account.password_hash });
            Ok(user)
        }

        async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }

        async fn update_password(&self, user_id: i32, password_hash: String) -> Result<(), AuthError> {
            let mut creds = self.creds.lock().unwrap();
            match creds.get_mut(&user_id) {
                Some(c) => {
                    c.password_hash = password_hash;
                    Ok(())
                }
                None => Err(AuthError::NotFound),
            }
        }
    }
}
