use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::comment;
use crate::types::dto::common::to_rfc3339;

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i32,
    pub content: String,
    pub created_at: String,
    pub author_id: i32,
}

impl From<comment::Model> for CommentResponse {
    fn from(model: comment::Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
            created_at: to_rfc3339(model.created_at),
            author_id: model.user_id,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateCommentResponse {
    pub message: String,
    pub comment: CommentResponse,
}

#[derive(ApiResponse, Debug)]
pub enum CreateCommentApiResponse {
    #[oai(status = 201)]
    Created(Json<CreateCommentResponse>),
}
