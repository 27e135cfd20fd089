use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
    /// One of patient, doctor, user, admin
    pub role: String,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    /// The account email
    pub username: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct AccessTokenDoc { pub access_token: String, pub token_type: String }

#[derive(ToSchema)]
pub struct ChangePasswordRequest { pub password: String, pub new_password: String, pub new_password_confirm: String }

#[derive(ToSchema)]
pub struct UserProfileDoc {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct ClinicRequest {
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub owner_contact: String,
    pub operating_hours: String,
    pub no_of_shifts: String,
    pub clinic_speciality: String,
    pub clinic_sub_speciality: String,
    pub staff_type: String,
}

#[derive(ToSchema)]
pub struct ClinicDoc {
    pub id: i32,
    pub owner_id: i32,
    pub owner_name: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub owner_contact: String,
    pub operating_hours: String,
    pub no_of_shifts: String,
    pub clinic_speciality: String,
    pub clinic_sub_speciality: String,
    pub staff_type: String,
    pub registration_date: String,
}

/// A profile or clinic picture row; `image_url` is the stored file name.
#[derive(ToSchema)]
pub struct PictureDoc { pub id: i32, pub image_url: String, pub created_at: String }

#[derive(ToSchema)]
pub struct ProfileUploadDoc {
    #[schema(value_type = String, format = Binary)]
    pub profile_picture: Vec<u8>,
}

#[derive(ToSchema)]
pub struct ClinicUploadDoc {
    pub clinic_id: i32,
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct LegalRequest {
    pub license_number: String,
    pub tax_number: String,
    pub commercial_registry: String,
    pub issuing_authority: String,
}

#[derive(ToSchema)]
pub struct LegalDoc {
    pub id: i32,
    pub owner_id: i32,
    pub license_number: String,
    pub tax_number: String,
    pub commercial_registry: String,
    pub issuing_authority: String,
    pub updated_at: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::change_password,
        crate::routes::users::list_all,
        crate::routes::users::me,
        crate::routes::users::get,
        crate::routes::users::delete_me,
        crate::routes::clinics::list_mine,
        crate::routes::clinics::create,
        crate::routes::clinics::get,
        crate::routes::clinics::update,
        crate::routes::clinics::delete,
        crate::routes::pictures::upload_profile_picture,
        crate::routes::pictures::profile_picture,
        crate::routes::pictures::profile_image,
        crate::routes::pictures::delete_profile_picture,
        crate::routes::pictures::add_clinic_pictures,
        crate::routes::pictures::clinic_pictures,
        crate::routes::pictures::clinic_image,
        crate::routes::pictures::delete_clinic_picture,
        crate::routes::legal::get,
        crate::routes::legal::put,
        crate::routes::legal::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            RegisterRequest,
            LoginRequest,
            AccessTokenDoc,
            ChangePasswordRequest,
            UserProfileDoc,
            ClinicRequest,
            ClinicDoc,
            PictureDoc,
            ProfileUploadDoc,
            ClinicUploadDoc,
            LegalRequest,
            LegalDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "admin"),
        (name = "user"),
        (name = "clinics"),
        (name = "pictures"),
        (name = "legal")
    )
)]
pub struct ApiDoc;
