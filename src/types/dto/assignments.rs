use poem_openapi::{payload::Json, types::MaybeUndefined, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::ticket_assignment;
use crate::types::dto::common::to_rfc3339;

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub id: i32,
    pub ticket_id: i32,
    pub user_id: i32,
    pub assignment_note: Option<String>,
    pub created_at: String,
}

impl From<ticket_assignment::Model> for AssignmentResponse {
    fn from(model: ticket_assignment::Model) -> Self {
        Self {
            id: model.id,
            ticket_id: model.ticket_id,
            user_id: model.user_id,
            assignment_note: model.assignment_note,
            created_at: to_rfc3339(model.created_at),
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AssignmentListResponse {
    pub assignments: Vec<AssignmentResponse>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateAssignmentRequest {
    pub user_id: i32,
    pub assignment_note: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateAssignmentResponse {
    pub message: String,
    pub assignment: AssignmentResponse,
}

#[derive(ApiResponse, Debug)]
pub enum CreateAssignmentApiResponse {
    #[oai(status = 201)]
    Created(Json<CreateAssignmentResponse>),
}

/// `assignment_note: null` clears the note; omitting it changes nothing
#[derive(Object, Debug, Default, Serialize, Deserialize)]
pub struct UpdateAssignmentRequest {
    #[serde(default)]
    pub assignment_note: MaybeUndefined<String>,
}

impl UpdateAssignmentRequest {
    pub fn note_change(self) -> Option<Option<String>> {
        match self.assignment_note {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => Some(None),
            MaybeUndefined::Value(note) => Some(Some(note)),
        }
    }
}
