use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use service::auth::domain::Caller;
use service::users::UserProfile;

use crate::{errors::JsonApiError, routes::auth::ServerState};

#[utoipa::path(
    get, path = "/admin/get_all_users", tag = "admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [crate::openapi::UserProfileDoc]),
        (status = 401, description = "Not Authorized")
    )
)]
pub async fn list_all(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<UserProfile>>, JsonApiError> {
    let users = state.users.list_all(&caller).await?;
    tracing::info!(count = users.len(), admin_id = caller.id, "list users");
    Ok(Json(users))
}

#[utoipa::path(
    get, path = "/user/get_user_information", tag = "user",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller profile", body = crate::openapi::UserProfileDoc),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(State(state): State<ServerState>, Extension(caller): Extension<Caller>) -> Result<Json<UserProfile>, JsonApiError> {
    Ok(Json(state.users.profile(&caller).await?))
}

#[utoipa::path(
    get, path = "/user/{user_id}", tag = "user",
    params(("user_id" = i32, Path, description = "User id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Profile", body = crate::openapi::UserProfileDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(user_id): Path<i32>) -> Result<Json<UserProfile>, JsonApiError> {
    Ok(Json(state.users.get(user_id).await?))
}

#[utoipa::path(
    delete, path = "/user/user_delete", tag = "user",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Account and owned data removed"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_me(State(state): State<ServerState>, Extension(caller): Extension<Caller>) -> Result<StatusCode, JsonApiError> {
    state.users.delete_account(&caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
