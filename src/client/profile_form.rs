use thiserror::Error;

use crate::client::backend::{AvatarFile, BackendError, ProfileBackend};
use crate::dtos::profile_dtos::UpdateProfileIn;
use crate::models::user::User;
use crate::services::image_service::delivery_url;

pub const PROFILE_PATH: &str = "/profile";
pub const REQUIRED_FIELDS_ERROR: &str = "Name and Email or Phone number are required.";

/// What the avatar slot shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarPreview {
    /// Delivery URL of the avatar already stored on the profile.
    Remote(String),
    /// Local object reference for a just-picked file; nothing uploaded yet.
    Local { file_name: String },
}

/// Where submit failed, once validation passed. The three network stages
/// fail distinctly instead of crashing the flow.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not get an upload URL: {0}")]
    UploadUrl(#[source] BackendError),
    #[error("avatar upload failed: {0}")]
    Upload(#[source] BackendError),
    #[error("profile update failed: {0}")]
    Update(#[source] BackendError),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Update accepted; the page navigates here.
    Redirect(&'static str),
    /// Local validation or server rejection; `form_error` has the message.
    Rejected,
}

/// View-model of the profile-edit page: field values, the picked avatar
/// file, the preview, and one form-level error slot.
#[derive(Debug, Default)]
pub struct EditProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    avatar: Option<AvatarFile>,
    pub avatar_preview: Option<AvatarPreview>,
    pub form_error: Option<String>,
}

impl EditProfileForm {
    /// Fetch the current profile and pre-fill the form from it.
    pub async fn load<B: ProfileBackend>(
        backend: &B,
        delivery_hash: &str,
    ) -> Result<Self, BackendError> {
        let profile = backend.fetch_profile().await?;
        Ok(Self::from_profile(&profile, delivery_hash))
    }

    pub fn from_profile(profile: &User, delivery_hash: &str) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
            avatar: None,
            avatar_preview: profile
                .avatar
                .as_ref()
                .map(|id| AvatarPreview::Remote(delivery_url(delivery_hash, id, "avatar"))),
            form_error: None,
        }
    }

    // Edits clear the form-level error, like the inputs' change handlers.

    pub fn set_name(&mut self, value: &str) {
        self.name = value.to_string();
        self.form_error = None;
    }

    pub fn set_email(&mut self, value: &str) {
        self.email = value.to_string();
        self.form_error = None;
    }

    pub fn set_phone(&mut self, value: &str) {
        self.phone = value.to_string();
        self.form_error = None;
    }

    /// The preview switches to the picked file immediately, before any
    /// upload. The picker only offers image/*, so anything else is ignored.
    pub fn select_avatar(&mut self, file: AvatarFile) {
        if file.content_type.type_() != mime::IMAGE {
            return;
        }
        self.avatar_preview = Some(AvatarPreview::Local {
            file_name: file.name.clone(),
        });
        self.avatar = Some(file);
    }

    fn validate(&mut self) -> bool {
        if self.name.is_empty() && self.email.is_empty() && self.phone.is_empty() {
            self.form_error = Some(REQUIRED_FIELDS_ERROR.to_string());
            return false;
        }
        true
    }

    /// Validate, run the two-step avatar upload when a file was picked, then
    /// send the update. Server rejections land in `form_error`; network
    /// failures come back as the stage that broke.
    pub async fn submit<B: ProfileBackend>(
        &mut self,
        backend: &B,
    ) -> Result<SubmitOutcome, SubmitError> {
        if !self.validate() {
            return Ok(SubmitOutcome::Rejected);
        }

        let avatar_id = match &self.avatar {
            Some(file) => {
                let upload_url = backend
                    .request_upload_url()
                    .await
                    .map_err(SubmitError::UploadUrl)?;
                let id = backend
                    .upload_avatar(&upload_url, file)
                    .await
                    .map_err(SubmitError::Upload)?;
                Some(id)
            }
            None => None,
        };

        let update = UpdateProfileIn {
            name: field(&self.name),
            email: field(&self.email),
            phone: field(&self.phone),
            avatar_id,
        };

        let response = backend
            .update_profile(&update)
            .await
            .map_err(SubmitError::Update)?;

        if response.ok {
            Ok(SubmitOutcome::Redirect(PROFILE_PATH))
        } else {
            self.form_error = Some(response.error.unwrap_or_else(|| "Update failed.".to_string()));
            Ok(SubmitOutcome::Rejected)
        }
    }
}

fn field(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
