use std::time::Duration;

use poem::web::cookie::{Cookie, SameSite};
use poem_openapi::{auth::ApiKey, SecurityScheme};

use crate::coordinators::AuthCoordinator;
use crate::errors::ApiError;
use crate::types::internal::RequestContext;

pub const SESSION_COOKIE: &str = "ticketdesk_session";

/// Opaque session token carried in the `ticketdesk_session` cookie
#[derive(SecurityScheme)]
#[oai(ty = "api_key", key_name = "ticketdesk_session", key_in = "cookie")]
pub struct SessionAuth(pub ApiKey);

impl SessionAuth {
    pub fn token(&self) -> &str {
        &self.0.key
    }
}

/// Resolve the session cookie into a request context
///
/// Every failure is reported as `Unauthenticated` without detail.
pub async fn authenticate(
    auth_coordinator: &AuthCoordinator,
    session: &SessionAuth,
) -> Result<RequestContext, ApiError> {
    let actor = auth_coordinator.resolve_session(session.token()).await?;
    Ok(RequestContext::for_actor(actor))
}

fn base_cookie(value: &str) -> Cookie {
    let mut cookie = Cookie::new_with_str(SESSION_COOKIE, value);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// `Set-Cookie` value issuing a session
pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    let mut cookie = base_cookie(token);
    cookie.set_max_age(Duration::from_secs(max_age_seconds.max(0) as u64));
    cookie.to_string()
}

/// `Set-Cookie` value that makes the browser drop the session cookie
pub fn expired_session_cookie() -> String {
    let mut cookie = base_cookie("");
    cookie.set_max_age(Duration::ZERO);
    cookie.to_string()
}
