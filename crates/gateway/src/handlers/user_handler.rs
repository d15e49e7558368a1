//! User handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{ApiResponse, AppError, AppResult};
use domain::{UserProfile, UserResponse};

use crate::extractors::ValidatedJson;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// Sign-up request; field rules beyond presence are enforced by the domain
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "Login ID is required"))]
    #[schema(example = "testuser123")]
    pub login_id: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "Test1234!@")]
    pub password: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "홍길동")]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "test@example.com")]
    pub email: String,
    #[schema(example = "1990-01-15")]
    pub birthday: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    #[schema(example = "Test1234!@")]
    pub current_password: String,
    #[validate(length(min = 1, message = "New password is required"))]
    #[schema(example = "NewPass1234!@")]
    pub new_password: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/me", get(get_me))
        .route("/me/password", patch(change_password))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users/signup",
    tag = "Users",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Login ID already taken")
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .user_service
        .sign_up(&req.login_id, &req.password, &req.name, &req.email, req.birthday)
        .await?;

    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Profile of the authenticated caller, name masked
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("login_id" = [], "login_pw" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 401, description = "Missing or invalid credentials")
    )
)]
pub async fn get_me(current: AuthenticatedUser) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let profile = UserProfile::try_from(current.user())?;
    Ok(Json(ApiResponse::success(profile)))
}

/// Change the authenticated caller's password
#[utoipa::path(
    patch,
    path = "/api/v1/users/me/password",
    tag = "Users",
    security(("login_id" = [], "login_pw" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "New password rejected"),
        (status = 401, description = "Missing or invalid credentials, or wrong current password")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    current: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let user_id = current
        .user()
        .id()
        .ok_or_else(|| AppError::internal("Authenticated user has no id"))?;

    state
        .user_service
        .change_password(user_id, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::message("Password changed successfully")))
}
