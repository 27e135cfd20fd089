use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use models::clinic::{self, ClinicFields};
use service::auth::domain::Caller;

use crate::{errors::JsonApiError, routes::auth::ServerState};

#[utoipa::path(
    get, path = "/clinics/all_clinic_info", tag = "clinics",
    security(("bearer" = [])),
    responses((status = 200, description = "Caller's clinics", body = [crate::openapi::ClinicDoc]))
)]
pub async fn list_mine(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<clinic::Model>>, JsonApiError> {
    Ok(Json(state.clinics.list_mine(&caller).await?))
}

#[utoipa::path(
    post, path = "/clinics/add_clinic", tag = "clinics",
    request_body = crate::openapi::ClinicRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Created", body = crate::openapi::ClinicDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Json(input): Json<ClinicFields>,
) -> Result<(StatusCode, Json<clinic::Model>), JsonApiError> {
    let created = state.clinics.create(&caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/clinics/get_clinic_by_id/{id}", tag = "clinics",
    params(("id" = i32, Path, description = "Clinic id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ClinicDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<clinic::Model>, JsonApiError> {
    Ok(Json(state.clinics.get(id).await?))
}

#[utoipa::path(
    put, path = "/clinics/update_clinic_information/{id}", tag = "clinics",
    params(("id" = i32, Path, description = "Clinic id")),
    request_body = crate::openapi::ClinicRequest,
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Updated"),
        (status = 401, description = "Not the owner"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(input): Json<ClinicFields>,
) -> Result<StatusCode, JsonApiError> {
    state.clinics.update(&caller, id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/clinics/delete/{id}", tag = "clinics",
    params(("id" = i32, Path, description = "Clinic id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not the owner"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    state.clinics.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
