use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "legal_information")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub owner_id: i32,
    pub license_number: String,
    pub tax_number: String,
    pub commercial_registry: String,
    pub issuing_authority: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Owner }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::OwnerId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalFields {
    pub license_number: String,
    pub tax_number: String,
    pub commercial_registry: String,
    pub issuing_authority: String,
}

impl LegalFields {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.license_number.trim().is_empty() {
            return Err(ModelError::Validation("license_number required".into()));
        }
        let too_long = [&self.license_number, &self.tax_number, &self.commercial_registry]
            .iter()
            .any(|v| v.len() > 64);
        if too_long || self.issuing_authority.len() > 128 {
            return Err(ModelError::Validation("legal identifier too long".into()));
        }
        Ok(())
    }
}

pub async fn find_by_owner<C: ConnectionTrait>(db: &C, owner_id: i32) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

/// Create or fully replace the owner's legal information row.
pub async fn upsert<C: ConnectionTrait>(db: &C, owner_id: i32, fields: LegalFields) -> Result<Model, ModelError> {
    fields.validate()?;
    let existing = find_by_owner(db, owner_id).await?;
    let is_new = existing.is_none();
    let mut am: ActiveModel = match existing {
        Some(row) => row.into(),
        None => ActiveModel { id: NotSet, owner_id: Set(owner_id), ..Default::default() },
    };
    am.license_number = Set(fields.license_number);
    am.tax_number = Set(fields.tax_number);
    am.commercial_registry = Set(fields.commercial_registry);
    am.issuing_authority = Set(fields.issuing_authority);
    am.updated_at = Set(Utc::now().into());
    if is_new {
        am.insert(db).await.map_err(ModelError::from_db)
    } else {
        am.update(db).await.map_err(ModelError::from_db)
    }
}

pub async fn delete_by_owner<C: ConnectionTrait>(db: &C, owner_id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_many().filter(Column::OwnerId.eq(owner_id)).exec(db).await?;
    Ok(res.rows_affected > 0)
}
