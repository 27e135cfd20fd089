use sea_orm::{entity::prelude::*, Condition, ConnectionTrait, NotSet, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Roles a user may hold.
pub const ROLES: [&str; 4] = ["patient", "doctor", "user", "admin"];
pub const ADMIN_ROLE: &str = "admin";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub mobile_number: String,
    pub hashed_password: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new `users` row. The password is already hashed.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub hashed_password: String,
    pub role: String,
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("full_name required".into()));
    }
    if name.len() > 128 {
        return Err(ModelError::Validation("full_name too long (<=128)".into()));
    }
    Ok(())
}

pub fn validate_mobile(mobile: &str) -> Result<(), ModelError> {
    let digits = mobile.trim().trim_start_matches('+');
    if digits.is_empty() || digits.len() > 32 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ModelError::Validation("mobile_number must be digits".into()));
    }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), ModelError> {
    if !ROLES.contains(&role) {
        return Err(ModelError::Validation(format!("role must be one of {}", ROLES.join(", "))));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<Model, ModelError> {
    validate_email(&new.email)?;
    validate_name(&new.full_name)?;
    validate_mobile(&new.mobile_number)?;
    validate_role(&new.role)?;
    if new.hashed_password.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        id: NotSet,
        full_name: Set(new.full_name),
        email: Set(new.email.trim().to_string()),
        mobile_number: Set(new.mobile_number.trim().to_string()),
        hashed_password: Set(new.hashed_password),
        role: Set(new.role),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email.trim()))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

/// First user holding either the email or the mobile number.
pub async fn find_by_email_or_mobile<C: ConnectionTrait>(
    db: &C,
    email: &str,
    mobile_number: &str,
) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(
            Condition::any()
                .add(Column::Email.eq(email.trim()))
                .add(Column::MobileNumber.eq(mobile_number.trim())),
        )
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Entity::find().order_by_asc(Column::Id).all(db).await.map_err(ModelError::from_db)
}

pub async fn update_password_hash<C: ConnectionTrait>(db: &C, id: i32, hashed_password: String) -> Result<Model, ModelError> {
    if hashed_password.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::NotFound("user not found".into()))?
        .into();
    am.hashed_password = Set(hashed_password);
    am.update(db).await.map_err(ModelError::from_db)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
