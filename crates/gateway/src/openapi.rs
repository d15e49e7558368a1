//! OpenAPI documentation.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::user_handler::{ChangePasswordRequest, SignUpRequest};
use domain::{UserProfile, UserResponse, LOGIN_ID_HEADER, LOGIN_PW_HEADER};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::sign_up,
        crate::handlers::user_handler::get_me,
        crate::handlers::user_handler::change_password,
    ),
    components(
        schemas(
            SignUpRequest,
            ChangePasswordRequest,
            UserResponse,
            UserProfile,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, profile and password endpoints"),
    )
)]
pub struct ApiDoc;

/// Registers the two credential headers as API-key schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "login_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(LOGIN_ID_HEADER))),
            );
            components.add_security_scheme(
                "login_pw",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(LOGIN_PW_HEADER))),
            );
        }
    }
}
