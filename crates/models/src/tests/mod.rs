/// CRUD operations tests for all models
pub mod crud_tests;


use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory SQLite database with the full schema applied.
pub async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    crate::db::migrate(&db).await?;
    Ok(db)
}

pub fn sample_user(tag: &str) -> crate::user::NewUser {
    crate::user::NewUser {
        full_name: format!("User {tag}"),
        email: format!("{tag}@example.com"),
        mobile_number: mobile_for(tag),
        hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        role: "doctor".into(),
    }
}

/// Distinct tags give distinct numbers: each byte becomes three digits.
pub fn mobile_for(tag: &str) -> String {
    let digits: String = tag.bytes().map(|b| format!("{b:03}")).collect();
    format!("0{digits}")
}

pub fn sample_clinic(title: &str) -> crate::clinic::ClinicFields {
    crate::clinic::ClinicFields {
        title: title.into(),
        description: "General practice".into(),
        address: "1 Nile St".into(),
        city: "Cairo".into(),
        province: "Cairo".into(),
        country: "EG".into(),
        owner_contact: "0100000000".into(),
        operating_hours: "9-17".into(),
        no_of_shifts: "2".into(),
        clinic_speciality: "Dentistry".into(),
        clinic_sub_speciality: "Orthodontics".into(),
        staff_type: "Full time".into(),
    }
}
