use poem_openapi::{payload::Json, types::MaybeUndefined, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::coordinators::{CreateTicketInput, TicketWithAssignees};
use crate::stores::{AssignedUser, TicketChanges};
use crate::types::db::ticket;
use crate::types::dto::common::to_rfc3339;

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct AssignedUserResponse {
    pub user_id: i32,
    pub username: String,
}

impl From<AssignedUser> for AssignedUserResponse {
    fn from(user: AssignedUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
        }
    }
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    /// The admin who created the ticket
    pub creator_id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub assigned_users: Vec<AssignedUserResponse>,
}

impl From<TicketWithAssignees> for TicketResponse {
    fn from(value: TicketWithAssignees) -> Self {
        let ticket::Model {
            id,
            title,
            description,
            status,
            creator_id,
            created_at,
            updated_at,
        } = value.ticket;

        Self {
            id,
            title,
            description,
            status,
            creator_id,
            created_at: to_rfc3339(created_at),
            updated_at: to_rfc3339(updated_at),
            assigned_users: value.assigned_users.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to "Open"
    pub status: Option<String>,
    /// At least one existing user id
    pub assigned_user_ids: Vec<i32>,
}

impl From<CreateTicketRequest> for CreateTicketInput {
    fn from(request: CreateTicketRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            status: request.status,
            assigned_user_ids: request.assigned_user_ids,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateTicketResponse {
    pub message: String,
    pub ticket: TicketResponse,
}

#[derive(ApiResponse, Debug)]
pub enum CreateTicketApiResponse {
    #[oai(status = 201)]
    Created(Json<CreateTicketResponse>),
}

/// Partial ticket update; `description: null` clears the description
#[derive(Object, Debug, Default, Serialize, Deserialize)]
pub struct UpdateTicketRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub description: MaybeUndefined<String>,
    pub status: Option<String>,
}

impl From<UpdateTicketRequest> for TicketChanges {
    fn from(request: UpdateTicketRequest) -> Self {
        let description = match request.description {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => Some(None),
            MaybeUndefined::Value(value) => Some(Some(value)),
        };

        Self {
            title: request.title,
            description,
            status: request.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_description_clears_and_missing_keeps() {
        let clear: TicketChanges = UpdateTicketRequest {
            description: MaybeUndefined::Null,
            ..Default::default()
        }
        .into();
        assert_eq!(clear.description, Some(None));

        let keep: TicketChanges = UpdateTicketRequest::default().into();
        assert_eq!(keep.description, None);
        assert!(keep.is_empty());
    }

    #[test]
    fn test_ticket_response_renders_timestamps() {
        let response: TicketResponse = TicketWithAssignees {
            ticket: ticket::Model {
                id: 1,
                title: "T".to_string(),
                description: None,
                status: "Open".to_string(),
                creator_id: 2,
                created_at: 0,
                updated_at: 60,
            },
            assigned_users: vec![AssignedUser {
                user_id: 3,
                username: "alice".to_string(),
            }],
        }
        .into();

        assert_eq!(response.created_at, "1970-01-01T00:00:00+00:00");
        assert_eq!(response.updated_at, "1970-01-01T00:01:00+00:00");
        assert_eq!(response.assigned_users[0].username, "alice");
    }
}
