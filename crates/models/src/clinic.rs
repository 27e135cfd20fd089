use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clinics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub owner_name: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub owner_contact: String,
    pub operating_hours: String,
    pub no_of_shifts: String,
    pub clinic_speciality: String,
    pub clinic_sub_speciality: String,
    pub staff_type: String,
    pub registration_date: DateTimeWithTimeZone,
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

/// The owner-editable part of a clinic. Updates replace all of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicFields {
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub owner_contact: String,
    pub operating_hours: String,
    pub no_of_shifts: String,
    pub clinic_speciality: String,
    pub clinic_sub_speciality: String,
    pub staff_type: String,
}

impl ClinicFields {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::Validation("title required".into()));
        }
        Ok(())
    }
}

impl Model {
    pub fn fields(&self) -> ClinicFields {
        ClinicFields {
            title: self.title.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            province: self.province.clone(),
            country: self.country.clone(),
            owner_contact: self.owner_contact.clone(),
            operating_hours: self.operating_hours.clone(),
            no_of_shifts: self.no_of_shifts.clone(),
            clinic_speciality: self.clinic_speciality.clone(),
            clinic_sub_speciality: self.clinic_sub_speciality.clone(),
            staff_type: self.staff_type.clone(),
        }
    }
}

fn apply(am: &mut ActiveModel, f: ClinicFields) {
    am.title = Set(f.title);
    am.description = Set(f.description);
    am.address = Set(f.address);
    am.city = Set(f.city);
    am.province = Set(f.province);
    am.country = Set(f.country);
    am.owner_contact = Set(f.owner_contact);
    am.operating_hours = Set(f.operating_hours);
    am.no_of_shifts = Set(f.no_of_shifts);
    am.clinic_speciality = Set(f.clinic_speciality);
    am.clinic_sub_speciality = Set(f.clinic_sub_speciality);
    am.staff_type = Set(f.staff_type);
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    owner_id: i32,
    owner_name: &str,
    fields: ClinicFields,
) -> Result<Model, ModelError> {
    fields.validate()?;
    let mut am = ActiveModel {
        id: NotSet,
        owner_id: Set(owner_id),
        owner_name: Set(owner_name.to_string()),
        registration_date: Set(Utc::now().into()),
        ..Default::default()
    };
    apply(&mut am, fields);
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn find_by_owner<C: ConnectionTrait>(db: &C, owner_id: i32) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(ModelError::from_db)
}

/// Full replace of the mutable columns; owner and registration date are kept.
pub async fn replace_fields<C: ConnectionTrait>(db: &C, id: i32, fields: ClinicFields) -> Result<Model, ModelError> {
    fields.validate()?;
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::NotFound("clinic not found".into()))?
        .into();
    apply(&mut am, fields);
    am.update(db).await.map_err(ModelError::from_db)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
