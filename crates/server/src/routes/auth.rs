use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension, Form, Json,
};
use sea_orm::DatabaseConnection;

use common::types::Message;
use configs::{AuthConfig, StorageConfig};
use service::auth::domain::{AccessToken, Caller, ChangePasswordInput, LoginInput, RegisterInput};
use service::auth::errors::AuthError;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::{AuthService, TokenIssuer};
use service::clinic::{repository::SeaOrmClinicRepository, ClinicService};
use service::legal::{repository::SeaOrmLegalRepository, LegalService};
use service::picture::{repository::SeaOrmPictureRepository, ImageStore, PictureService};
use service::users::{repository::SeaOrmUserRepository, UserService};

use crate::errors::JsonApiError;

/// Shared handler state: one service per resource over a common pool.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub users: Arc<UserService<SeaOrmUserRepository>>,
    pub clinics: Arc<ClinicService<SeaOrmClinicRepository>>,
    pub pictures: Arc<PictureService<SeaOrmPictureRepository>>,
    pub legal: Arc<LegalService<SeaOrmLegalRepository>>,
    pub max_upload_bytes: usize,
}

impl ServerState {
    /// Wire every service over one pool. Fails when the signing secret is empty.
    pub fn new(db: DatabaseConnection, auth: &AuthConfig, storage: &StorageConfig) -> Result<Self, AuthError> {
        let tokens = TokenIssuer::new(&auth.jwt_secret, chrono::Duration::minutes(auth.token_ttl_minutes))?;
        let images = ImageStore::new(&storage.image_dir);
        Ok(Self {
            auth: Arc::new(
                AuthService::new(Arc::new(SeaOrmAuthRepository::new(db.clone())), tokens)
                    .with_admin_signup(auth.allow_admin_signup),
            ),
            users: Arc::new(UserService::new(Arc::new(SeaOrmUserRepository::new(db.clone())), images.clone())),
            clinics: Arc::new(ClinicService::new(Arc::new(SeaOrmClinicRepository::new(db.clone())), images.clone())),
            pictures: Arc::new(PictureService::new(Arc::new(SeaOrmPictureRepository::new(db.clone())), images)),
            legal: Arc::new(LegalService::new(Arc::new(SeaOrmLegalRepository::new(db)))),
            max_upload_bytes: storage.max_upload_bytes,
        })
    }
}

#[utoipa::path(
    post, path = "/auth/", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MessageDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(Message::new("User created successfully"))))
}

#[utoipa::path(
    post, path = "/auth/token", tag = "auth",
    request_body(content = crate::openapi::LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = crate::openapi::AccessTokenDoc),
        (status = 401, description = "Could not validate credentials")
    )
)]
pub async fn login(State(state): State<ServerState>, Form(input): Form<LoginInput>) -> Result<Json<AccessToken>, JsonApiError> {
    Ok(Json(state.auth.login(input).await?))
}

#[utoipa::path(
    put, path = "/user/change/password", tag = "user",
    request_body = crate::openapi::ChangePasswordRequest,
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Confirmation mismatch"),
        (status = 401, description = "Wrong current password")
    )
)]
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Json(input): Json<ChangePasswordInput>,
) -> Result<StatusCode, JsonApiError> {
    state.auth.change_password(&caller, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Route-layer middleware for protected routes: requires
/// `Authorization: Bearer <token>`, verifies it and stores the [`Caller`] in
/// request extensions. Missing, malformed or invalid tokens are 401.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match header {
        Some(h) => match h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")) {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(JsonApiError::unauthorized("Could not validate credentials"));
            }
        },
        None => {
            tracing::warn!(path = %path, "missing Authorization header");
            return Err(JsonApiError::unauthorized("Not authenticated"));
        }
    };

    match state.auth.authenticate(&token) {
        Ok(caller) => {
            tracing::debug!(path = %path, user_id = caller.id, "bearer token accepted");
            req.extensions_mut().insert(caller);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(JsonApiError::unauthorized("Could not validate credentials"))
        }
    }
}
