use axum::{extract::State, http::StatusCode, Extension, Json};
use models::legal_information::{self, LegalFields};
use service::auth::domain::Caller;

use crate::{errors::JsonApiError, routes::auth::ServerState};

#[utoipa::path(
    get, path = "/legal/", tag = "legal",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's legal information", body = crate::openapi::LegalDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<legal_information::Model>, JsonApiError> {
    Ok(Json(state.legal.get(&caller).await?))
}

#[utoipa::path(
    put, path = "/legal/", tag = "legal",
    request_body = crate::openapi::LegalRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Saved", body = crate::openapi::LegalDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn put(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Json(input): Json<LegalFields>,
) -> Result<Json<legal_information::Model>, JsonApiError> {
    Ok(Json(state.legal.put(&caller, input).await?))
}

#[utoipa::path(
    delete, path = "/legal/", tag = "legal",
    security(("bearer" = [])),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, Extension(caller): Extension<Caller>) -> Result<StatusCode, JsonApiError> {
    state.legal.delete(&caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
