use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, QueryOrder, QuerySelect, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{clinic, errors::ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clinic_pictures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub clinic_id: i32,
    pub image_url: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Clinic }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Clinic => Entity::belongs_to(clinic::Entity)
                .from(Column::ClinicId)
                .to(clinic::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, clinic_id: i32, image_url: &str) -> Result<Model, ModelError> {
    if image_url.trim().is_empty() {
        return Err(ModelError::Validation("image_url required".into()));
    }
    let am = ActiveModel {
        id: NotSet,
        clinic_id: Set(clinic_id),
        image_url: Set(image_url.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn list_by_clinic<C: ConnectionTrait>(db: &C, clinic_id: i32) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::ClinicId.eq(clinic_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(ModelError::from_db)
}

/// Stored file names of every picture attached to any of `clinic_ids`.
pub async fn file_names_for_clinics<C: ConnectionTrait>(db: &C, clinic_ids: &[i32]) -> Result<Vec<String>, ModelError> {
    if clinic_ids.is_empty() {
        return Ok(Vec::new());
    }
    Entity::find()
        .select_only()
        .column(Column::ImageUrl)
        .filter(Column::ClinicId.is_in(clinic_ids.iter().copied()))
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(ModelError::from_db)
}

pub async fn delete_by_clinics<C: ConnectionTrait>(db: &C, clinic_ids: &[i32]) -> Result<u64, ModelError> {
    if clinic_ids.is_empty() {
        return Ok(0);
    }
    let res = Entity::delete_many()
        .filter(Column::ClinicId.is_in(clinic_ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
