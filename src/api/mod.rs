// API layer - HTTP endpoints
pub mod assignments;
pub mod auth;
pub mod comments;
pub mod dev;
pub mod health;
pub mod helpers;
pub mod tickets;
pub mod users;

pub use assignments::AssignmentsApi;
pub use auth::AuthApi;
pub use comments::CommentsApi;
pub use dev::DevApi;
pub use health::HealthApi;
pub use helpers::{SessionAuth, SESSION_COOKIE};
pub use tickets::TicketsApi;
pub use users::UsersApi;


use std::sync::Arc;

use poem::{
    middleware::{CookieJarManager, Cors},
    Endpoint, EndpointExt, IntoResponse, Response, Route,
};
use poem_openapi::OpenApiService;

use crate::app_data::AppData;
use crate::errors::ApiError;

/// Render extraction failures with the same error body handlers use
async fn render_framework_error(err: poem::Error) -> Response {
    match ApiError::from_poem_error(&err) {
        Some(api_error) => api_error.into_response(),
        None => err.into_response(),
    }
}

/// Compose every API under `/api` with Swagger UI at `/swagger`
pub fn build_app(app_data: Arc<AppData>) -> impl Endpoint<Output = Response> {
    let cors = Cors::new()
        .allow_origin(app_data.settings.cors_allowed_origin())
        .allow_credentials(true);

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            TicketsApi::new(app_data.clone()),
            AssignmentsApi::new(app_data.clone()),
            CommentsApi::new(app_data.clone()),
            UsersApi::new(app_data.clone()),
            DevApi::new(app_data),
        ),
        "ticketdesk API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/api");

    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .catch_all_error(render_framework_error)
        .with(CookieJarManager::new())
        .with(cors)
}
