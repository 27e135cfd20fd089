pub mod auth;
pub mod clinics;
pub mod legal;
pub mod pictures;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public routes, bearer-protected
/// routes and the Swagger UI.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/", post(auth::register))
        .route("/auth/create_user", post(auth::register))
        .route("/auth/token", post(auth::login))
        .route("/picture/profile_image/:filename", get(pictures::profile_image))
        .route("/picture/clinic_images/:filename", get(pictures::clinic_image));

    let protected = Router::new()
        .route("/admin/get_all_users", get(users::list_all))
        .route("/user/get_user_information", get(users::me))
        .route("/user/change/password", put(auth::change_password))
        .route("/user/user_delete", delete(users::delete_me))
        .route("/user/:user_id", get(users::get))
        .route("/clinics/all_clinic_info", get(clinics::list_mine))
        .route("/clinics/add_clinic", post(clinics::create))
        .route("/clinics/get_clinic_by_id/:id", get(clinics::get))
        .route("/clinics/update_clinic_information/:id", put(clinics::update))
        .route("/clinics/delete/:id", delete(clinics::delete))
        .route("/picture/upload_profile_picture", post(pictures::upload_profile_picture))
        .route("/picture/profile_picture", get(pictures::profile_picture))
        .route("/picture/profile_picture/:id", delete(pictures::delete_profile_picture))
        .route("/picture/add_clinic_pictures", post(pictures::add_clinic_pictures))
        .route("/picture/clinic/:clinic_id", get(pictures::clinic_pictures))
        .route("/picture/clinic_picture/:id", delete(pictures::delete_clinic_picture))
        .route("/legal/", get(legal::get).put(legal::put).delete(legal::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token));

    let body_limit = state.max_upload_bytes;
    public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
