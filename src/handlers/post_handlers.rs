use actix_web::{HttpResponse, get, post, web};
use log::debug;

use crate::AppState;
use crate::dtos::post_dtos::{CreatePostIn, CreatePostOut, ListPostsOut, ListPostsQuery};
use crate::error::ApiError;
use crate::middleware::session::SessionUser;
use crate::models::post::BoundingBox;
use crate::repositories::post_repository::PostRepository;

/// POST /api/posts
/// Create a post at the given coordinates, owned by the session user.
#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    user: SessionUser,
    body: web::Json<CreatePostIn>,
) -> Result<HttpResponse, ApiError> {
    let post = PostRepository::create(&state.pg_pool, user.user_id, &body).await?;
    debug!("user {} created post {}", user.user_id, post.id);
    Ok(HttpResponse::Ok().json(CreatePostOut { ok: true, post }))
}

/// GET /api/posts?latitude=..&longitude=..
/// List posts within ±0.1° of the query point, newest first.
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<AppState>,
    _user: SessionUser,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse, ApiError> {
    let latitude = parse_coordinate(&query.latitude);
    let longitude = parse_coordinate(&query.longitude);
    debug!("listing posts around ({latitude}, {longitude})");

    let bbox = BoundingBox::around(latitude, longitude);
    let posts = PostRepository::list_within(&state.pg_pool, &bbox).await?;
    Ok(HttpResponse::Ok().json(ListPostsOut { ok: true, posts }))
}

// Unparseable input falls through to NaN, which the range filter treats as
// matching nothing.
fn parse_coordinate(raw: &str) -> f64 {
    raw.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_parse_as_floats() {
        assert_eq!(parse_coordinate("37.55"), 37.55);
        assert_eq!(parse_coordinate("-127"), -127.0);
    }

    #[test]
    fn garbage_degrades_to_nan_not_an_error() {
        assert!(parse_coordinate("not-a-number").is_nan());
        assert!(parse_coordinate("").is_nan());
    }
}
