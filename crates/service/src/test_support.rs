#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::auth::domain::Caller;

/// Fresh in-memory database with every migration applied. One pooled
/// connection so every query sees the same database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Insert a user row directly and return the matching caller identity.
pub async fn seed_user(db: &DatabaseConnection, tag: &str, role: &str) -> Result<Caller, anyhow::Error> {
    let u = models::user::create(
        db,
        models::user::NewUser {
            full_name: format!("Dr {tag}"),
            email: format!("{tag}@clinic.test"),
            mobile_number: tag.bytes().fold(String::from("0"), |acc, b| format!("{acc}{b:03}")),
            hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            role: role.into(),
        },
    )
    .await?;
    Ok(Caller { id: u.id, email: u.email, role: u.role })
}

pub fn clinic_fields(title: &str) -> models::clinic::ClinicFields {
    models::clinic::ClinicFields {
        title: title.into(),
        description: "Family medicine".into(),
        address: "12 Tahrir Sq".into(),
        city: "Cairo".into(),
        province: "Cairo".into(),
        country: "Egypt".into(),
        owner_contact: "01000000000".into(),
        operating_hours: "09:00-17:00".into(),
        no_of_shifts: "2".into(),
        clinic_speciality: "Pediatrics".into(),
        clinic_sub_speciality: "Neonatology".into(),
        staff_type: "Full time".into(),
    }
}

pub fn image(name: &str, content_type: &str) -> crate::picture::UploadedImage {
    crate::picture::UploadedImage {
        file_name: Some(name.into()),
        content_type: Some(content_type.into()),
        bytes: vec![1, 2, 3, 4],
    }
}

pub fn files_in(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|it| it.count()).unwrap_or(0)
}
