//! Header-credential authentication gate.
//!
//! Every request outside the excluded paths must carry the login ID and raw
//! password headers. Credentials are verified against the identity service on
//! each request; nothing is cached between requests.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use common::{AppError, AppResult};
use domain::{requires_authentication, User, LOGIN_ID_HEADER, LOGIN_PW_HEADER};

use crate::state::AppState;

const MISSING_CREDENTIALS: &str = "Authentication credentials are required";

/// The caller resolved by the gate for the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(MISSING_CREDENTIALS))
    }
}

/// Authentication middleware applied to the whole router.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !requires_authentication(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let login_id = credential_header(&request, LOGIN_ID_HEADER)?;
    let password = credential_header(&request, LOGIN_PW_HEADER)?;

    let user = state
        .user_service
        .authenticate(&login_id, &password)
        .await
        .inspect_err(|_| warn!(path = %request.uri().path(), "Rejected invalid credentials"))?;

    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}

/// Read a credential header, rejecting absent, non-UTF-8 or blank values.
fn credential_header(request: &Request, name: &str) -> AppResult<String> {
    let value = request
        .headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty());

    match value {
        Some(v) => Ok(v.to_string()),
        None => {
            warn!(path = %request.uri().path(), header = name, "Missing credential header");
            Err(AppError::unauthorized(MISSING_CREDENTIALS))
        }
    }
}
