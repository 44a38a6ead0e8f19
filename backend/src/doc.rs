//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `crate::inbound::http` and two
//! equivalent security schemes: a bearer token in the `Authorization` header
//! and the `authToken` cookie. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    EnrichedPropertyRequest, Error, ErrorCode, Listing, ListingAgent, ListingDetails,
    ListingPatch, PropertyRequest, RequestStatus, Role, UserProfile, UserSummary,
};
use crate::inbound::http::property_requests::{CreateRequestBody, StatusChangeBody};
use crate::inbound::http::users::{
    AuthResponse, AuthStatusResponse, LoginRequest, MessageResponse, ProfileResponse,
    RegisterRequest,
};

/// Enrich the generated document with the token security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Session token returned by POST /api/users/login or /api/users/register.",
                    ))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "AuthCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "authToken",
                "Cookie set alongside the session token; used when no Authorization header is sent.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gator Homes backend API",
        description = "Listings, accounts and property requests for the Gator Homes marketplace."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = []), ("AuthCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::auth_status,
        crate::inbound::http::users::profile,
        crate::inbound::http::property_requests::create_request,
        crate::inbound::http::property_requests::my_requests,
        crate::inbound::http::property_requests::transition_request,
        crate::inbound::http::listings::list_listings,
        crate::inbound::http::listings::get_listing,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::update_listing,
        crate::inbound::http::listings::delete_listing,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        UserSummary,
        UserProfile,
        Listing,
        ListingAgent,
        ListingDetails,
        ListingPatch,
        PropertyRequest,
        EnrichedPropertyRequest,
        RequestStatus,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        AuthStatusResponse,
        ProfileResponse,
        MessageResponse,
        CreateRequestBody,
        StatusChangeBody,
    )),
    tags(
        (name = "users", description = "Registration, login and identity"),
        (name = "requests", description = "Property request workflow"),
        (name = "housing", description = "Listing catalogue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
