use std::env;

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image service error: {0}")]
    Service(String),
}

/// A one-time upload slot issued by the image service.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectUpload {
    pub id: Uuid,
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
}

#[derive(Debug, Deserialize)]
struct DirectUploadEnvelope {
    success: bool,
    result: Option<DirectUpload>,
}

/// Public delivery URL for a stored image variant.
pub fn delivery_url(delivery_hash: &str, image_id: &Uuid, variant: &str) -> String {
    format!("https://imagedelivery.net/{delivery_hash}/{image_id}/{variant}")
}

/// Client for the Cloudflare Images API: issues direct-upload URLs and
/// templates delivery URLs. Uploads themselves go browser-to-Cloudflare.
#[derive(Clone)]
pub struct ImageService {
    client: reqwest::Client,
    account_id: String,
    api_token: String,
    delivery_hash: String,
}

impl ImageService {
    pub fn new_from_env() -> Self {
        let account_id = env::var("CF_ACCOUNT_ID")
            .expect("CF_ACCOUNT_ID is required")
            .trim()
            .to_string();
        let api_token = env::var("CF_API_TOKEN")
            .expect("CF_API_TOKEN is required")
            .trim()
            .to_string();
        let delivery_hash = env::var("CF_DELIVERY_HASH")
            .expect("CF_DELIVERY_HASH is required")
            .trim()
            .to_string();

        Self {
            client: reqwest::Client::new(),
            account_id,
            api_token,
            delivery_hash,
        }
    }

    pub async fn direct_upload_url(&self) -> Result<DirectUpload, ImageError> {
        let url = format!(
            "https://api.cloudflare.com/client/v4/accounts/{}/images/v2/direct_upload",
            self.account_id
        );

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ImageError::Service(format!("{} -> {}", status.as_u16(), body)));
        }

        let envelope: DirectUploadEnvelope = serde_json::from_str(&body)
            .map_err(|e| ImageError::Service(format!("invalid response: {e}")))?;
        if !envelope.success {
            return Err(ImageError::Service(format!("upload url refused: {body}")));
        }
        envelope
            .result
            .ok_or_else(|| ImageError::Service("no result in response".to_string()))
    }

    pub fn avatar_url(&self, image_id: &Uuid) -> String {
        delivery_url(&self.delivery_hash, image_id, "avatar")
    }
}
