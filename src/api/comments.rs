use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::helpers::{authenticate, SessionAuth};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, CommentCoordinator};
use crate::errors::ApiError;
use crate::types::dto::comments::{
    CommentResponse, CreateCommentApiResponse, CreateCommentRequest, CreateCommentResponse,
};
use crate::types::dto::common::MessageResponse;

/// Comment endpoints
pub struct CommentsApi {
    auth_coordinator: Arc<AuthCoordinator>,
    comment_coordinator: Arc<CommentCoordinator>,
}

impl CommentsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data.clone())),
            comment_coordinator: Arc::new(CommentCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum CommentTags {
    /// Ticket comments
    Comments,
}

#[OpenApi]
impl CommentsApi {
    /// Comments on a ticket, oldest first
    #[oai(path = "/tickets/:ticket_id/comments", method = "get", tag = "CommentTags::Comments")]
    async fn list_comments(
        &self,
        auth: SessionAuth,
        ticket_id: Path<i32>,
    ) -> Result<Json<Vec<CommentResponse>>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        let comments = self.comment_coordinator.list(&ctx, ticket_id.0).await?;
        Ok(Json(comments.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/tickets/:ticket_id/comments", method = "post", tag = "CommentTags::Comments")]
    async fn create_comment(
        &self,
        auth: SessionAuth,
        ticket_id: Path<i32>,
        body: Json<CreateCommentRequest>,
    ) -> Result<CreateCommentApiResponse, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        let comment = self
            .comment_coordinator
            .create(&ctx, ticket_id.0, body.0.content)
            .await?;

        Ok(CreateCommentApiResponse::Created(Json(CreateCommentResponse {
            message: "Comment added".to_string(),
            comment: comment.into(),
        })))
    }

    /// Delete a comment (its author, or the admin who created the ticket)
    #[oai(path = "/comments/:comment_id", method = "delete", tag = "CommentTags::Comments")]
    async fn delete_comment(
        &self,
        auth: SessionAuth,
        comment_id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        self.comment_coordinator.delete(&ctx, comment_id.0).await?;
        Ok(Json(MessageResponse::new("Comment deleted successfully")))
    }
}
