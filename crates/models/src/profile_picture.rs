use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile_pictures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub image_url: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

/// Point the user's single profile picture row at `image_url`, creating it on
/// first upload. Returns the row and the file name it replaced, if any.
pub async fn upsert<C: ConnectionTrait>(db: &C, user_id: i32, image_url: &str) -> Result<(Model, Option<String>), ModelError> {
    if image_url.trim().is_empty() {
        return Err(ModelError::Validation("image_url required".into()));
    }
    let now = Utc::now().into();
    match find_by_user(db, user_id).await? {
        Some(existing) => {
            let previous = existing.image_url.clone();
            let mut am: ActiveModel = existing.into();
            am.image_url = Set(image_url.to_string());
            am.created_at = Set(now);
            let updated = am.update(db).await.map_err(ModelError::from_db)?;
            Ok((updated, Some(previous)))
        }
        None => {
            let am = ActiveModel {
                id: NotSet,
                user_id: Set(user_id),
                image_url: Set(image_url.to_string()),
                created_at: Set(now),
            };
            let created = am.insert(db).await.map_err(ModelError::from_db)?;
            Ok((created, None))
        }
    }
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
