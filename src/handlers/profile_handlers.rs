use actix_web::{HttpResponse, get, post, web};

use crate::AppState;
use crate::dtos::profile_dtos::{ProfileOut, UpdateProfileIn, UpdateProfileOut};
use crate::error::ApiError;
use crate::middleware::session::SessionUser;
use crate::repositories::user_repository::UserRepository;

/// GET /api/users/me
#[get("/users/me")]
pub async fn me(state: web::Data<AppState>, user: SessionUser) -> Result<HttpResponse, ApiError> {
    let profile = UserRepository::get_by_id(&state.pg_pool, user.user_id)
        .await?
        .ok_or(ApiError::NotFound("profile"))?;
    Ok(HttpResponse::Ok().json(ProfileOut { ok: true, profile }))
}

/// POST /api/users/me
/// Apply the optional profile fields one at a time. A uniqueness conflict on
/// email or phone answers `{ok: false, error}` and leaves the rest untouched.
#[post("/users/me")]
pub async fn update_me(
    state: web::Data<AppState>,
    user: SessionUser,
    body: web::Json<UpdateProfileIn>,
) -> Result<HttpResponse, ApiError> {
    let pool = &state.pg_pool;
    let current = UserRepository::get_by_id(pool, user.user_id)
        .await?
        .ok_or(ApiError::NotFound("profile"))?;

    if let Some(email) = non_empty(&body.email) {
        if current.email.as_deref() != Some(email) {
            if UserRepository::email_in_use(pool, email, user.user_id).await? {
                return Ok(reject("Email is already in use."));
            }
            UserRepository::set_email(pool, user.user_id, email).await?;
        }
    }

    if let Some(phone) = non_empty(&body.phone) {
        if current.phone.as_deref() != Some(phone) {
            if UserRepository::phone_in_use(pool, phone, user.user_id).await? {
                return Ok(reject("Phone number is already in use."));
            }
            UserRepository::set_phone(pool, user.user_id, phone).await?;
        }
    }

    if let Some(name) = non_empty(&body.name) {
        UserRepository::set_name(pool, user.user_id, name).await?;
    }

    if let Some(avatar_id) = body.avatar_id {
        UserRepository::set_avatar(pool, user.user_id, avatar_id).await?;
    }

    Ok(HttpResponse::Ok().json(UpdateProfileOut { ok: true, error: None }))
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn reject(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(UpdateProfileOut {
        ok: false,
        error: Some(message.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_count_as_absent() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("yena".into())), Some("yena"));
    }
}
