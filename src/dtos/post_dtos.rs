use serde::{Deserialize, Serialize};

use crate::models::post::{Post, PostWithRelations};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePostIn {
    pub question: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostOut {
    pub ok: bool,
    pub post: Post,
}

/// Raw query values. Parsing happens in the handler so a non-numeric value
/// degrades to an empty listing instead of a rejected request.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListPostsOut {
    pub ok: bool,
    pub posts: Vec<PostWithRelations>,
}
