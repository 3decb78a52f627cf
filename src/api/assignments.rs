use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::helpers::{authenticate, SessionAuth};
use crate::app_data::AppData;
use crate::coordinators::{AssignmentCoordinator, AuthCoordinator};
use crate::errors::ApiError;
use crate::types::dto::assignments::{
    AssignmentListResponse, CreateAssignmentApiResponse, CreateAssignmentRequest,
    CreateAssignmentResponse, UpdateAssignmentRequest,
};
use crate::types::dto::common::MessageResponse;

/// Ticket assignment endpoints
pub struct AssignmentsApi {
    auth_coordinator: Arc<AuthCoordinator>,
    assignment_coordinator: Arc<AssignmentCoordinator>,
}

impl AssignmentsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data.clone())),
            assignment_coordinator: Arc::new(AssignmentCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum AssignmentTags {
    /// Ticket assignments
    Assignments,
}

#[OpenApi]
impl AssignmentsApi {
    /// Assignments of a ticket; non-admins only see their own
    #[oai(path = "/tickets/:ticket_id/assignments", method = "get", tag = "AssignmentTags::Assignments")]
    async fn list_assignments(
        &self,
        auth: SessionAuth,
        ticket_id: Path<i32>,
    ) -> Result<Json<AssignmentListResponse>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        let assignments = self.assignment_coordinator.list(&ctx, ticket_id.0).await?;

        Ok(Json(AssignmentListResponse {
            assignments: assignments.into_iter().map(Into::into).collect(),
        }))
    }

    #[oai(path = "/tickets/:ticket_id/assignments", method = "post", tag = "AssignmentTags::Assignments")]
    async fn create_assignment(
        &self,
        auth: SessionAuth,
        ticket_id: Path<i32>,
        body: Json<CreateAssignmentRequest>,
    ) -> Result<CreateAssignmentApiResponse, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        let Json(request) = body;
        let assignment = self
            .assignment_coordinator
            .create(&ctx, ticket_id.0, request.user_id, request.assignment_note)
            .await?;

        Ok(CreateAssignmentApiResponse::Created(Json(CreateAssignmentResponse {
            message: "User assigned to ticket successfully".to_string(),
            assignment: assignment.into(),
        })))
    }

    #[oai(
        path = "/tickets/:ticket_id/assignments/:assignment_id",
        method = "patch",
        tag = "AssignmentTags::Assignments"
    )]
    async fn update_assignment(
        &self,
        auth: SessionAuth,
        ticket_id: Path<i32>,
        assignment_id: Path<i32>,
        body: Json<UpdateAssignmentRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        self.assignment_coordinator
            .update(&ctx, ticket_id.0, assignment_id.0, body.0.note_change())
            .await?;
        Ok(Json(MessageResponse::new("Assignment updated successfully")))
    }

    #[oai(
        path = "/tickets/:ticket_id/assignments/:assignment_id",
        method = "delete",
        tag = "AssignmentTags::Assignments"
    )]
    async fn delete_assignment(
        &self,
        auth: SessionAuth,
        ticket_id: Path<i32>,
        assignment_id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        self.assignment_coordinator
            .delete(&ctx, ticket_id.0, assignment_id.0)
            .await?;
        Ok(Json(MessageResponse::new("Assignment deleted successfully")))
    }
}
