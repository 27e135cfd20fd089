mod support;

use axum::http::StatusCode;
use serde_json::json;

use support::{build_app, clinic_body, empty_request, json_request, multipart_request, Part};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[tokio::test]
async fn test_owner_scoped_clinic_lifecycle() -> anyhow::Result<()> {
    let app = build_app().await?;
    let alice = app.signup("alice", "01000000001").await?;
    let bob = app.signup("bob", "01000000002").await?;

    let created = app.create_clinic(&alice, "Sunrise").await?;
    let id = created["id"].as_i64().unwrap_or_default();
    assert!(id > 0);
    assert_eq!(created["owner_name"], "Dr alice");

    let (status, got) = app.json(empty_request("GET", &format!("/clinics/get_clinic_by_id/{id}"), Some(&bob))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got["title"], "Sunrise");
    assert!(got["registration_date"].is_string());

    let (status, _) = app.json(json_request("PUT", &format!("/clinics/update_clinic_information/{id}"), Some(&bob), &clinic_body("Hijack"))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.json(empty_request("DELETE", &format!("/clinics/delete/{id}"), Some(&bob))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.json(json_request("PUT", &format!("/clinics/update_clinic_information/{id}"), Some(&alice), &clinic_body("Sunset"))?).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, mine) = app.json(empty_request("GET", "/clinics/all_clinic_info", Some(&alice))?).await?;
    assert_eq!(mine[0]["title"], "Sunset");
    let (_, theirs) = app.json(empty_request("GET", "/clinics/all_clinic_info", Some(&bob))?).await?;
    assert_eq!(theirs.as_array().map(|a| a.len()), Some(0));

    let (status, _) = app.json(empty_request("DELETE", &format!("/clinics/delete/{id}"), Some(&alice))?).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app.json(empty_request("GET", &format!("/clinics/get_clinic_by_id/{id}"), Some(&alice))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn test_missing_clinic_is_not_found_before_ownership() -> anyhow::Result<()> {
    let app = build_app().await?;
    let bob = app.signup("bob", "01000000002").await?;
    let (status, _) = app.json(empty_request("DELETE", "/clinics/delete/4242", Some(&bob))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.json(empty_request("GET", "/clinics/get_clinic_by_id/0", Some(&bob))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_clinic_pictures_round_trip() -> anyhow::Result<()> {
    let app = build_app().await?;
    let alice = app.signup("alice", "01000000001").await?;
    let bob = app.signup("bob", "01000000002").await?;
    let clinic_id = app.create_clinic(&alice, "Sunrise").await?["id"].as_i64().unwrap_or_default();

    let parts = [
        Part::Text { name: "clinic_id", value: clinic_id.to_string() },
        Part::File { name: "images", file_name: "front.png", content_type: "image/png", bytes: PNG },
        Part::File { name: "images", file_name: "lobby.png", content_type: "image/png", bytes: PNG },
    ];
    let (status, _) = app.json(multipart_request("/picture/add_clinic_pictures", &bob, &parts)?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.files_in("clinic_pictures"), 0);

    let (status, rows) = app.json(multipart_request("/picture/add_clinic_pictures", &alice, &parts)?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rows.as_array().map(|a| a.len()), Some(2));
    assert_eq!(app.files_in("clinic_pictures"), 2);

    let (status, listed) = app.json(empty_request("GET", &format!("/picture/clinic/{clinic_id}"), Some(&bob))?).await?;
    assert_eq!(status, StatusCode::OK);
    let file = listed[0]["image_url"].as_str().unwrap_or_default().to_string();
    assert!(file.ends_with(".png"));

    let (status, bytes) = app.send(empty_request("GET", &format!("/picture/clinic_images/{file}"), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, PNG);
    let (status, _) = app.send(empty_request("GET", "/picture/clinic_images/..%2F..%2Fetc%2Fpasswd", None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let pic_id = listed[0]["id"].as_i64().unwrap_or_default();
    let (status, _) = app.json(empty_request("DELETE", &format!("/picture/clinic_picture/{pic_id}"), Some(&bob))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = app.json(empty_request("DELETE", &format!("/picture/clinic_picture/{pic_id}"), Some(&alice))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Image deleted successfully");
    assert_eq!(app.files_in("clinic_pictures"), 1);
    let (status, _) = app.send(empty_request("GET", &format!("/picture/clinic_images/{file}"), None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_non_image_upload_rejected_without_write() -> anyhow::Result<()> {
    let app = build_app().await?;
    let alice = app.signup("alice", "01000000001").await?;
    let clinic_id = app.create_clinic(&alice, "Sunrise").await?["id"].as_i64().unwrap_or_default();

    let parts = [
        Part::Text { name: "clinic_id", value: clinic_id.to_string() },
        Part::File { name: "images", file_name: "front.png", content_type: "image/png", bytes: PNG },
        Part::File { name: "images", file_name: "cv.pdf", content_type: "application/pdf", bytes: b"%PDF-1.4" },
    ];
    let (status, body) = app.json(multipart_request("/picture/add_clinic_pictures", &alice, &parts)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(app.files_in("clinic_pictures"), 0);

    let parts = [Part::File { name: "profile_picture", file_name: "notes.txt", content_type: "text/plain", bytes: b"hello" }];
    let (status, _) = app.json(multipart_request("/picture/upload_profile_picture", &alice, &parts)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.files_in("profile_pictures"), 0);
    Ok(())
}

#[tokio::test]
async fn test_profile_picture_flow() -> anyhow::Result<()> {
    let app = build_app().await?;
    let alice = app.signup("alice", "01000000001").await?;
    let bob = app.signup("bob", "01000000002").await?;

    let (status, _) = app.json(empty_request("GET", "/picture/profile_picture", Some(&alice))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let parts = [Part::File { name: "profile_picture", file_name: "me.png", content_type: "image/png", bytes: PNG }];
    let (status, first) = app.json(multipart_request("/picture/upload_profile_picture", &alice, &parts)?).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = app.json(multipart_request("/picture/upload_profile_picture", &alice, &parts)?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], second["id"]);
    assert_eq!(app.files_in("profile_pictures"), 1);

    let file = second["image_url"].as_str().unwrap_or_default().to_string();
    let (status, bytes) = app.send(empty_request("GET", &format!("/picture/profile_image/{file}"), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, PNG);

    let id = second["id"].as_i64().unwrap_or_default();
    let (status, _) = app.json(empty_request("DELETE", &format!("/picture/profile_picture/{id}"), Some(&bob))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.json(empty_request("DELETE", &format!("/picture/profile_picture/{id}"), Some(&alice))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.files_in("profile_pictures"), 0);
    Ok(())
}

#[tokio::test]
async fn test_legal_information_and_account_removal() -> anyhow::Result<()> {
    let app = build_app().await?;
    let alice = app.signup("alice", "01000000001").await?;

    let (status, _) = app.json(empty_request("GET", "/legal/", Some(&alice))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let legal = json!({"license_number": "LIC-9", "tax_number": "TX-1", "commercial_registry": "CR-2", "issuing_authority": "MoH"});
    let (status, saved) = app.json(json_request("PUT", "/legal/", Some(&alice), &legal)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["license_number"], "LIC-9");
    let (status, got) = app.json(empty_request("GET", "/legal/", Some(&alice))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got["id"], saved["id"]);

    let clinic_id = app.create_clinic(&alice, "Sunrise").await?["id"].as_i64().unwrap_or_default();
    let parts = [
        Part::Text { name: "clinic_id", value: clinic_id.to_string() },
        Part::File { name: "images", file_name: "front.png", content_type: "image/png", bytes: PNG },
    ];
    let (status, _) = app.json(multipart_request("/picture/add_clinic_pictures", &alice, &parts)?).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.json(empty_request("DELETE", "/user/user_delete", Some(&alice))?).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.files_in("clinic_pictures"), 0);

    // token still verifies but the account is gone
    let (status, _) = app.json(empty_request("GET", "/user/get_user_information", Some(&alice))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.json(empty_request("GET", "/legal/", Some(&alice))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.json(json_request("PUT", "/legal/", Some(&alice), &legal)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    let parts = [Part::File { name: "profile_picture", file_name: "me.png", content_type: "image/png", bytes: PNG }];
    let (status, _) = app.json(multipart_request("/picture/upload_profile_picture", &alice, &parts)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.files_in("profile_pictures"), 0);
    Ok(())
}
