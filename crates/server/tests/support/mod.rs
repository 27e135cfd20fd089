#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tower::ServiceExt;

use configs::{AuthConfig, StorageConfig};
use server::routes::{self, auth::ServerState};

pub const PASSWORD: &str = "S3curePass!";

pub struct TestApp {
    pub router: Router,
    pub images: tempfile::TempDir,
}

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

pub async fn build_app() -> anyhow::Result<TestApp> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;

    let images = tempfile::tempdir()?;
    let auth = AuthConfig { jwt_secret: "test-secret".into(), token_ttl_minutes: 20, allow_admin_signup: true };
    let storage = StorageConfig { image_dir: images.path().to_string_lossy().into_owned(), max_upload_bytes: 1024 * 1024 };
    let state = ServerState::new(db, &auth, &storage)?;
    Ok(TestApp { router: routes::build_router(cors(), state), images })
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        Ok((status, bytes.to_vec()))
    }

    pub async fn json(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let (status, bytes) = self.send(req).await?;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, value))
    }

    pub async fn register(&self, tag: &str, mobile: &str, role: &str) -> anyhow::Result<StatusCode> {
        let body = json!({
            "full_name": format!("Dr {tag}"),
            "email": format!("{tag}@clinic.test"),
            "mobile_number": mobile,
            "password": PASSWORD,
            "role": role,
        });
        let (status, _) = self.json(json_request("POST", "/auth/create_user", None, &body)?).await?;
        Ok(status)
    }

    pub async fn login(&self, tag: &str) -> anyhow::Result<String> {
        let form = format!("grant_type=password&username={tag}%40clinic.test&password={PASSWORD}");
        let req = Request::builder()
            .method("POST")
            .uri("/auth/token")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(form))?;
        let (status, body) = self.json(req).await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {status} {body}");
        Ok(body["access_token"].as_str().unwrap_or_default().to_string())
    }

    /// Register and log in; returns the bearer token.
    pub async fn signup(&self, tag: &str, mobile: &str) -> anyhow::Result<String> {
        let status = self.register(tag, mobile, "doctor").await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {status}");
        self.login(tag).await
    }

    pub async fn create_clinic(&self, token: &str, title: &str) -> anyhow::Result<Value> {
        let (status, body) = self.json(json_request("POST", "/clinics/add_clinic", Some(token), &clinic_body(title))?).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create clinic failed: {status} {body}");
        Ok(body)
    }

    pub fn files_in(&self, sub: &str) -> usize {
        std::fs::read_dir(self.images.path().join(sub)).map(|it| it.count()).unwrap_or(0)
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> anyhow::Result<Request<Body>> {
    let mut b = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {t}"));
    }
    Ok(b.body(Body::from(serde_json::to_vec(body)?))?)
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut b = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {t}"));
    }
    Ok(b.body(Body::empty())?)
}

pub fn clinic_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Family medicine",
        "address": "12 Tahrir Sq",
        "city": "Cairo",
        "province": "Cairo",
        "country": "Egypt",
        "owner_contact": "01000000000",
        "operating_hours": "09:00-17:00",
        "no_of_shifts": "2",
        "clinic_speciality": "Pediatrics",
        "clinic_sub_speciality": "Neonatology",
        "staff_type": "Full time",
    })
}

pub enum Part<'a> {
    Text { name: &'a str, value: String },
    File { name: &'a str, file_name: &'a str, content_type: &'a str, bytes: &'a [u8] },
}

const BOUNDARY: &str = "----clinicconnect-test-boundary";

pub fn multipart_request(uri: &str, token: &str, parts: &[Part<'_>]) -> anyhow::Result<Request<Body>> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes());
                body.extend_from_slice(value.as_bytes());
            }
            Part::File { name, file_name, content_type, bytes } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n")
                        .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))?)
}
