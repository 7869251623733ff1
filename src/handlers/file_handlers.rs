use actix_web::{HttpResponse, get, web};

use crate::dtos::file_dtos::UploadUrlOut;
use crate::error::ApiError;
use crate::middleware::session::SessionUser;
use crate::services::image_service::ImageService;

/// GET /api/files
/// Hand the client a one-time direct-upload URL from the image service.
#[get("/files")]
pub async fn get_upload_url(
    _user: SessionUser,
    images: web::Data<ImageService>,
) -> Result<HttpResponse, ApiError> {
    let upload = images.direct_upload_url().await?;
    Ok(HttpResponse::Ok().json(UploadUrlOut {
        ok: true,
        upload_url: upload.upload_url,
    }))
}
