use mime::Mime;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::dtos::file_dtos::UploadUrlOut;
use crate::dtos::profile_dtos::{ProfileOut, UpdateProfileIn, UpdateProfileOut};
use crate::middleware::session::SESSION_COOKIE;
use crate::models::user::User;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// An avatar file picked in the file dialog.
#[derive(Debug, Clone)]
pub struct AvatarFile {
    pub name: String,
    pub content_type: Mime,
    pub bytes: Vec<u8>,
}

/// Network seam of the profile-edit flow. The real implementation talks to
/// the API and the image service; tests script it.
#[allow(async_fn_in_trait)]
pub trait ProfileBackend {
    async fn fetch_profile(&self) -> Result<User, BackendError>;
    async fn request_upload_url(&self) -> Result<String, BackendError>;
    async fn upload_avatar(&self, upload_url: &str, file: &AvatarFile)
    -> Result<Uuid, BackendError>;
    async fn update_profile(&self, update: &UpdateProfileIn)
    -> Result<UpdateProfileOut, BackendError>;
}

/// `ProfileBackend` over HTTP. The session cookie is attached to API calls
/// the way the browser would attach it; the avatar upload goes straight to
/// the image service URL with no credentials.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    session_cookie: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            session_cookie: format!("{}={}", SESSION_COOKIE, session_token.into()),
        }
    }

    fn api(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Deserialize)]
struct UploadedImage {
    id: Uuid,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    result: Option<UploadedImage>,
}

impl ProfileBackend for HttpBackend {
    async fn fetch_profile(&self) -> Result<User, BackendError> {
        let out: ProfileOut = self
            .client
            .get(self.api("/api/users/me"))
            .header(reqwest::header::COOKIE, &self.session_cookie)
            .send()
            .await?
            .json()
            .await?;
        if !out.ok {
            return Err(BackendError::UnexpectedResponse("profile fetch refused".into()));
        }
        Ok(out.profile)
    }

    async fn request_upload_url(&self) -> Result<String, BackendError> {
        let out: UploadUrlOut = self
            .client
            .get(self.api("/api/files"))
            .header(reqwest::header::COOKIE, &self.session_cookie)
            .send()
            .await?
            .json()
            .await?;
        if !out.ok {
            return Err(BackendError::UnexpectedResponse("upload url refused".into()));
        }
        Ok(out.upload_url)
    }

    async fn upload_avatar(
        &self,
        upload_url: &str,
        file: &AvatarFile,
    ) -> Result<Uuid, BackendError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.content_type.as_ref())?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp: UploadResponse = self
            .client
            .post(upload_url)
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        if !resp.success {
            return Err(BackendError::UnexpectedResponse("upload refused".into()));
        }
        resp.result
            .map(|image| image.id)
            .ok_or_else(|| BackendError::UnexpectedResponse("no image id in upload response".into()))
    }

    async fn update_profile(
        &self,
        update: &UpdateProfileIn,
    ) -> Result<UpdateProfileOut, BackendError> {
        Ok(self
            .client
            .post(self.api("/api/users/me"))
            .header(reqwest::header::COOKIE, &self.session_cookie)
            .json(update)
            .send()
            .await?
            .json()
            .await?)
    }
}
