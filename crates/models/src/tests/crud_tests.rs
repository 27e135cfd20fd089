use super::{sample_clinic, sample_user, setup_test_db};
use crate::errors::ModelError;
use crate::{clinic, clinic_picture, legal_information, profile_picture, user};
use anyhow::Result;
use sea_orm::EntityTrait;

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = user::create(&db, sample_user("alice")).await?;
    assert!(created.id > 0);
    assert!(created.is_active);

    let by_email = user::find_by_email(&db, "alice@example.com").await?.unwrap();
    assert_eq!(by_email.id, created.id);

    let by_mobile = user::find_by_email_or_mobile(&db, "nobody@example.com", &created.mobile_number).await?;
    assert_eq!(by_mobile.map(|u| u.id), Some(created.id));

    let updated = user::update_password_hash(&db, created.id, "$argon2id$new".into()).await?;
    assert_eq!(updated.hashed_password, "$argon2id$new");

    assert!(user::hard_delete(&db, created.id).await?);
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    assert!(!user::hard_delete(&db, created.id).await?);
    Ok(())
}

#[tokio::test]
async fn test_user_unique_email_is_conflict() -> Result<()> {
    let db = setup_test_db().await?;
    user::create(&db, sample_user("bob")).await?;

    let mut dup = sample_user("bob");
    dup.mobile_number = "0199999999".into();
    let err = user::create(&db, dup).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_user_invalid_role_rejected() -> Result<()> {
    let db = setup_test_db().await?;
    let mut u = sample_user("carol");
    u.role = "superuser".into();
    assert!(matches!(user::create(&db, u).await, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_clinic_crud() -> Result<()> {
    let db = setup_test_db().await?;
    let owner = user::create(&db, sample_user("dora")).await?;

    let fields = sample_clinic("Smile Clinic");
    let created = clinic::create(&db, owner.id, &owner.full_name, fields.clone()).await?;
    assert_eq!(created.owner_id, owner.id);
    assert_eq!(created.owner_name, owner.full_name);
    assert_eq!(created.fields(), fields);

    let listed = clinic::find_by_owner(&db, owner.id).await?;
    assert_eq!(listed.len(), 1);

    let mut changed = fields.clone();
    changed.title = "Bright Smile".into();
    changed.city = "Giza".into();
    let updated = clinic::replace_fields(&db, created.id, changed.clone()).await?;
    assert_eq!(updated.fields(), changed);
    assert_eq!(updated.registration_date, created.registration_date);

    let missing = clinic::replace_fields(&db, created.id + 100, changed).await;
    assert!(matches!(missing, Err(ModelError::NotFound(_))));

    assert!(clinic::hard_delete(&db, created.id).await?);
    assert!(clinic::find_by_owner(&db, owner.id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_clinic_requires_title() -> Result<()> {
    let db = setup_test_db().await?;
    let owner = user::create(&db, sample_user("erin")).await?;
    let res = clinic::create(&db, owner.id, &owner.full_name, sample_clinic("  ")).await;
    assert!(matches!(res, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_clinic_pictures() -> Result<()> {
    let db = setup_test_db().await?;
    let owner = user::create(&db, sample_user("fred")).await?;
    let c1 = clinic::create(&db, owner.id, &owner.full_name, sample_clinic("One")).await?;
    let c2 = clinic::create(&db, owner.id, &owner.full_name, sample_clinic("Two")).await?;

    clinic_picture::create(&db, c1.id, "a.png").await?;
    clinic_picture::create(&db, c1.id, "b.png").await?;
    let other = clinic_picture::create(&db, c2.id, "c.png").await?;

    assert_eq!(clinic_picture::list_by_clinic(&db, c1.id).await?.len(), 2);

    let mut names = clinic_picture::file_names_for_clinics(&db, &[c1.id, c2.id]).await?;
    names.sort();
    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);

    assert_eq!(clinic_picture::delete_by_clinics(&db, &[c1.id]).await?, 2);
    assert!(clinic_picture::list_by_clinic(&db, c1.id).await?.is_empty());
    assert!(clinic_picture::hard_delete(&db, other.id).await?);
    assert_eq!(clinic_picture::delete_by_clinics(&db, &[]).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_profile_picture_upsert_keeps_single_row() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, sample_user("gina")).await?;

    let (first, prev) = profile_picture::upsert(&db, u.id, "first.jpg").await?;
    assert!(prev.is_none());

    let (second, prev) = profile_picture::upsert(&db, u.id, "second.jpg").await?;
    assert_eq!(prev.as_deref(), Some("first.jpg"));
    assert_eq!(second.id, first.id);

    let found = profile_picture::find_by_user(&db, u.id).await?.unwrap();
    assert_eq!(found.image_url, "second.jpg");
    Ok(())
}

#[tokio::test]
async fn test_legal_information_upsert_and_delete() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, sample_user("hank")).await?;

    let fields = legal_information::LegalFields {
        license_number: "LIC-1".into(),
        tax_number: "TAX-1".into(),
        commercial_registry: "CR-1".into(),
        issuing_authority: "Ministry of Health".into(),
    };
    let created = legal_information::upsert(&db, u.id, fields.clone()).await?;
    assert_eq!(created.license_number, "LIC-1");

    let mut replaced = fields.clone();
    replaced.license_number = "LIC-2".into();
    let updated = legal_information::upsert(&db, u.id, replaced).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.license_number, "LIC-2");

    assert!(legal_information::delete_by_owner(&db, u.id).await?);
    assert!(legal_information::find_by_owner(&db, u.id).await?.is_none());

    let mut invalid = fields;
    invalid.license_number = String::new();
    assert!(legal_information::upsert(&db, u.id, invalid).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_same_length_tags_get_distinct_mobiles() -> Result<()> {
    let db = setup_test_db().await?;
    let a = user::create(&db, sample_user("dora")).await?;
    let b = user::create(&db, sample_user("erin")).await?;
    assert_ne!(a.mobile_number, b.mobile_number);
    Ok(())
}

#[tokio::test]
async fn test_dangling_owner_is_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, sample_user("ivan")).await?;
    user::hard_delete(&db, u.id).await?;

    let err = profile_picture::upsert(&db, u.id, "late.png").await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_)));
    Ok(())
}
