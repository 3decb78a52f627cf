use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::helpers::{authenticate, SessionAuth};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, TicketCoordinator};
use crate::errors::ApiError;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::tickets::{
    CreateTicketApiResponse, CreateTicketRequest, CreateTicketResponse, TicketResponse,
    UpdateTicketRequest,
};

/// Ticket endpoints
pub struct TicketsApi {
    auth_coordinator: Arc<AuthCoordinator>,
    ticket_coordinator: Arc<TicketCoordinator>,
}

impl TicketsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data.clone())),
            ticket_coordinator: Arc::new(TicketCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum TicketTags {
    /// Tickets
    Tickets,
}

#[OpenApi]
impl TicketsApi {
    /// List tickets visible to the caller
    ///
    /// Admins see every ticket; other users see tickets they are assigned to.
    #[oai(path = "/tickets", method = "get", tag = "TicketTags::Tickets")]
    async fn list_tickets(&self, auth: SessionAuth) -> Result<Json<Vec<TicketResponse>>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        let tickets = self.ticket_coordinator.list(&ctx).await?;
        Ok(Json(tickets.into_iter().map(Into::into).collect()))
    }

    /// Create a ticket with its initial assignments (admin only)
    #[oai(path = "/tickets", method = "post", tag = "TicketTags::Tickets")]
    async fn create_ticket(
        &self,
        auth: SessionAuth,
        body: Json<CreateTicketRequest>,
    ) -> Result<CreateTicketApiResponse, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        let created = self.ticket_coordinator.create(&ctx, body.0.into()).await?;

        Ok(CreateTicketApiResponse::Created(Json(CreateTicketResponse {
            message: "Ticket created".to_string(),
            ticket: created.into(),
        })))
    }

    #[oai(path = "/tickets/:ticket_id", method = "get", tag = "TicketTags::Tickets")]
    async fn get_ticket(&self, auth: SessionAuth, ticket_id: Path<i32>) -> Result<Json<TicketResponse>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        let ticket = self.ticket_coordinator.get(&ctx, ticket_id.0).await?;
        Ok(Json(ticket.into()))
    }

    /// Update title, description or status (creator admin only)
    #[oai(path = "/tickets/:ticket_id", method = "patch", tag = "TicketTags::Tickets")]
    async fn update_ticket(
        &self,
        auth: SessionAuth,
        ticket_id: Path<i32>,
        body: Json<UpdateTicketRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        self.ticket_coordinator
            .update(&ctx, ticket_id.0, body.0.into())
            .await?;
        Ok(Json(MessageResponse::new("Ticket updated successfully")))
    }

    /// Delete a ticket with its assignments and comments (creator admin only)
    #[oai(path = "/tickets/:ticket_id", method = "delete", tag = "TicketTags::Tickets")]
    async fn delete_ticket(&self, auth: SessionAuth, ticket_id: Path<i32>) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        self.ticket_coordinator.delete(&ctx, ticket_id.0).await?;
        Ok(Json(MessageResponse::new("Ticket deleted successfully")))
    }
}
