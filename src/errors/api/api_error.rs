use crate::errors::internal::{CredentialError, InternalError, SessionError, TicketError};
use crate::types::internal::DenyReason;
use poem_openapi::error::{AuthorizationError, ContentTypeError, ParseParamError, ParseRequestPayloadError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error body for every endpoint
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Errors surfaced by the HTTP API
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Missing or malformed request fields
    #[oai(status = 400)]
    ValidationError(Json<ErrorResponse>),

    /// No valid session, bad credentials or bad elevation secret
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorResponse>),

    /// Authenticated but not permitted
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Referenced entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Duplicate username or duplicate assignment
    #[oai(status = 400)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError(body("validation_error", message, 400))
    }

    pub fn unauthenticated() -> Self {
        ApiError::Unauthenticated(body(
            "unauthenticated",
            "Unauthorized, this is a protected route. Please log in.",
            401,
        ))
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthenticated(body("invalid_credentials", "Invalid credentials", 401))
    }

    pub fn forbidden(reason: DenyReason) -> Self {
        match reason {
            // Secret possession is an authentication question, not a permission one
            DenyReason::InvalidElevationSecret => {
                ApiError::Unauthenticated(body(reason.code(), "Invalid password", 401))
            }
            _ => ApiError::Forbidden(body(reason.code(), reason.to_string(), 403)),
        }
    }

    pub fn not_found(error: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound(body(error, message, 404))
    }

    pub fn conflict(error: &str, message: impl Into<String>) -> Self {
        ApiError::Conflict(body(error, message, 400))
    }

    fn internal_server_error() -> Self {
        ApiError::InternalError(body("internal_error", "An internal error occurred", 500))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but never exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(_) => {
                tracing::error!("Database error: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Credential(CredentialError::PasswordHashingFailed(_)) => {
                tracing::error!("{}", err);
                Self::internal_server_error()
            }

            InternalError::Validation { message, .. } => {
                tracing::debug!("{}", err);
                Self::validation(message.clone())
            }
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::DuplicateUsername(username)) => {
                tracing::warn!("Duplicate username attempt: {}", username);
                Self::conflict("duplicate_username", "Username already exists")
            }
            InternalError::Session(session_err) => {
                tracing::debug!("Session rejected: {}", session_err);
                if let SessionError::UserGone(user_id) = session_err {
                    tracing::warn!("Session references missing user {}", user_id);
                }
                Self::unauthenticated()
            }
            InternalError::Ticket(ticket_err) => match ticket_err {
                TicketError::TicketNotFound(_) => {
                    Self::not_found("ticket_not_found", ticket_err.to_string())
                }
                TicketError::UserNotFound(_) => {
                    Self::not_found("user_not_found", ticket_err.to_string())
                }
                TicketError::AssignmentNotFound(_) => {
                    Self::not_found("assignment_not_found", ticket_err.to_string())
                }
                TicketError::CommentNotFound(_) => {
                    Self::not_found("comment_not_found", ticket_err.to_string())
                }
                TicketError::DuplicateAssignment { .. } => {
                    Self::conflict("duplicate_assignment", ticket_err.to_string())
                }
            },
            InternalError::AccessDenied(reason) => Self::forbidden(*reason),
        }
    }

    /// Convert an error raised by poem-openapi before a handler ran
    ///
    /// Request extraction failures become 400 and a missing session cookie
    /// becomes 401. Anything else (unknown route, wrong method) is left to poem.
    pub fn from_poem_error(err: &poem::Error) -> Option<Self> {
        if err.is::<AuthorizationError>() {
            return Some(Self::unauthenticated());
        }

        if err.is::<ParseRequestPayloadError>()
            || err.is::<ParseParamError>()
            || err.is::<ContentTypeError>()
        {
            tracing::debug!("Rejected request: {}", err);
            return Some(Self::validation(err.to_string()));
        }

        None
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            ApiError::ValidationError(json)
            | ApiError::Unauthenticated(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.response().message.clone()
    }

    /// Machine-readable error code
    pub fn code(&self) -> &str {
        &self.response().error
    }

    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
