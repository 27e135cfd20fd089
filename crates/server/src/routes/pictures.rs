use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use common::types::Message;
use models::{clinic_picture, profile_picture};
use service::auth::domain::Caller;
use service::picture::{StoredImage, UploadedImage};

use crate::{errors::JsonApiError, routes::auth::ServerState};

fn multipart_error(e: axum::extract::multipart::MultipartError) -> JsonApiError {
    JsonApiError::new(e.status(), "Invalid Upload", Some(e.body_text()))
}

async fn read_file(field: axum::extract::multipart::Field<'_>) -> Result<UploadedImage, JsonApiError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;
    Ok(UploadedImage { file_name, content_type, bytes: bytes.to_vec() })
}

fn image_response(img: StoredImage) -> Response {
    ([(header::CONTENT_TYPE, img.content_type)], img.bytes).into_response()
}

#[utoipa::path(
    post, path = "/picture/upload_profile_picture", tag = "pictures",
    request_body(content = crate::openapi::ProfileUploadDoc, content_type = "multipart/form-data"),
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Saved", body = crate::openapi::PictureDoc),
        (status = 400, description = "Not an image")
    )
)]
pub async fn upload_profile_picture(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<profile_picture::Model>), JsonApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("profile_picture") {
            upload = Some(read_file(field).await?);
        }
    }
    let upload = upload.ok_or_else(|| JsonApiError::bad_request("missing multipart field 'profile_picture'"))?;
    let saved = state.pictures.upload_profile_picture(&caller, upload).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[utoipa::path(
    get, path = "/picture/profile_picture", tag = "pictures",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's profile picture", body = crate::openapi::PictureDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn profile_picture(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<profile_picture::Model>, JsonApiError> {
    Ok(Json(state.pictures.profile_picture(&caller).await?))
}

#[utoipa::path(
    get, path = "/picture/profile_image/{filename}", tag = "pictures",
    params(("filename" = String, Path, description = "Stored file name")),
    responses((status = 200, description = "Image bytes"), (status = 404, description = "Not Found"))
)]
pub async fn profile_image(State(state): State<ServerState>, Path(filename): Path<String>) -> Result<Response, JsonApiError> {
    Ok(image_response(state.pictures.profile_image(&filename).await?))
}

#[utoipa::path(
    delete, path = "/picture/profile_picture/{id}", tag = "pictures",
    params(("id" = i32, Path, description = "Profile picture id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 401, description = "Not the owner"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_profile_picture(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> Result<Json<Message>, JsonApiError> {
    state.pictures.delete_profile_picture(&caller, id).await?;
    Ok(Json(Message::new("Image deleted successfully")))
}

#[utoipa::path(
    post, path = "/picture/add_clinic_pictures", tag = "pictures",
    request_body(content = crate::openapi::ClinicUploadDoc, content_type = "multipart/form-data"),
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Saved", body = [crate::openapi::PictureDoc]),
        (status = 400, description = "Not an image"),
        (status = 401, description = "Not the clinic owner"),
        (status = 404, description = "Clinic not found")
    )
)]
pub async fn add_clinic_pictures(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<clinic_picture::Model>>), JsonApiError> {
    let mut clinic_id = None;
    let mut images = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("clinic_id") => {
                let text = field.text().await.map_err(multipart_error)?;
                let id = text
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| JsonApiError::bad_request("clinic_id must be an integer"))?;
                clinic_id = Some(id);
            }
            Some("images") => images.push(read_file(field).await?),
            _ => {}
        }
    }
    let clinic_id = clinic_id.ok_or_else(|| JsonApiError::bad_request("missing multipart field 'clinic_id'"))?;
    let rows = state.pictures.add_clinic_pictures(&caller, clinic_id, images).await?;
    Ok((StatusCode::CREATED, Json(rows)))
}

#[utoipa::path(
    get, path = "/picture/clinic/{clinic_id}", tag = "pictures",
    params(("clinic_id" = i32, Path, description = "Clinic id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Picture records", body = [crate::openapi::PictureDoc]),
        (status = 404, description = "Clinic not found")
    )
)]
pub async fn clinic_pictures(
    State(state): State<ServerState>,
    Path(clinic_id): Path<i32>,
) -> Result<Json<Vec<clinic_picture::Model>>, JsonApiError> {
    Ok(Json(state.pictures.clinic_pictures(clinic_id).await?))
}

#[utoipa::path(
    get, path = "/picture/clinic_images/{filename}", tag = "pictures",
    params(("filename" = String, Path, description = "Stored file name")),
    responses((status = 200, description = "Image bytes"), (status = 404, description = "Not Found"))
)]
pub async fn clinic_image(State(state): State<ServerState>, Path(filename): Path<String>) -> Result<Response, JsonApiError> {
    Ok(image_response(state.pictures.clinic_image(&filename).await?))
}

#[utoipa::path(
    delete, path = "/picture/clinic_picture/{id}", tag = "pictures",
    params(("id" = i32, Path, description = "Clinic picture id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 401, description = "Not the clinic owner"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_clinic_picture(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> Result<Json<Message>, JsonApiError> {
    state.pictures.delete_clinic_picture(&caller, id).await?;
    Ok(Json(Message::new("Image deleted successfully")))
}
