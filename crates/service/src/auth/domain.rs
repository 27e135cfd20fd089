use serde::{Deserialize, Serialize};

use super::token::AccessClaims;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
    pub role: String,
}

/// Login input (OAuth2 password grant: `username` carries the email)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Password change input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordInput {
    pub password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// Domain user (business view, no credential material)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub role: String,
    pub is_active: bool,
}

/// Account row to persist; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub role: String,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: i32,
    pub password_hash: String,
}

/// Login result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(token: String) -> Self {
        Self { access_token: token, token_type: "bearer".into() }
    }
}

/// Identity of the caller, derived from a verified token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Caller {
    pub id: i32,
    pub email: String,
    pub role: String,
}

impl From<AccessClaims> for Caller {
    fn from(c: AccessClaims) -> Self {
        Self { id: c.id, email: c.sub, role: c.role }
    }
}

impl From<models::user::Model> for AuthUser {
    fn from(u: models::user::Model) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            mobile_number: u.mobile_number,
            role: u.role,
            is_active: u.is_active,
        }
    }
}
