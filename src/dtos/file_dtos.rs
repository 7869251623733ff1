use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlOut {
    pub ok: bool,
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
}
