//! Account API handlers.
//!
//! ```text
//! POST /api/users/register {"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","password":"secret1"}
//! POST /api/users/login {"email":"ada@example.com","password":"secret1"}
//! POST /api/users/logout
//! GET /api/users/auth/status
//! GET /api/users/profile
//! ```

use actix_web::{HttpResponse, HttpResponseBuilder, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthSession, Error, LoginCredentials, RegistrationDetails, RegistrationInput, UserProfile,
    UserSummary,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credentials_error;

/// Registration request body for `POST /api/users/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
}

/// Login request body for `POST /api/users/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

/// Body returned by registration and login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    pub user: UserSummary,
    /// Session token; also set as the `authToken` cookie.
    pub token: String,
}

/// Plain confirmation body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by `GET /api/users/auth/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub is_authenticated: bool,
    pub user: UserSummary,
}

/// Body returned by `GET /api/users/profile`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

fn session_response(
    mut builder: HttpResponseBuilder,
    state: &HttpState,
    session: AuthSession,
    message: &str,
) -> HttpResponse {
    let AuthSession { token, user } = session;
    builder
        .cookie(state.session.auth_cookie(&token))
        .json(AuthResponse {
            message: message.to_owned(),
            user: user.summary(),
            token: token.as_str().to_owned(),
        })
}

/// Create an account and open a session for it.
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "authToken cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let details = RegistrationDetails::try_from_input(RegistrationInput {
        first_name: &payload.first_name,
        last_name: &payload.last_name,
        email: &payload.email,
        phone: payload.phone.as_deref(),
        password: &payload.password,
    })
    .map_err(|err| credentials_error(&err))?;
    let session = state.accounts.register(details).await?;
    Ok(session_response(
        HttpResponse::Created(),
        &state,
        session,
        "user registered successfully",
    ))
}

/// Exchange credentials for a session token.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "authToken cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(|err| credentials_error(&err))?;
    let session = state.accounts.login(credentials).await?;
    Ok(session_response(
        HttpResponse::Ok(),
        &state,
        session,
        "login successful",
    ))
}

/// Expire the auth cookie. Issued tokens stay valid until they expire.
#[utoipa::path(
    post,
    path = "/api/users/logout",
    responses(
        (status = 200, description = "Cookie cleared", body = MessageResponse)
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/users/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.session.expired_cookie())
        .json(MessageResponse::new("logged out successfully"))
}

/// Report the identity behind the presented token.
#[utoipa::path(
    get,
    path = "/api/users/auth/status",
    responses(
        (status = 200, description = "Authenticated", body = AuthStatusResponse),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["users"],
    operation_id = "authStatus"
)]
#[get("/users/auth/status")]
pub async fn auth_status(user: AuthenticatedUser) -> web::Json<AuthStatusResponse> {
    web::Json(AuthStatusResponse {
        is_authenticated: true,
        user: user.0.summary(),
    })
}

/// Full profile of the caller, including the phone number.
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["users"],
    operation_id = "profile"
)]
#[get("/users/profile")]
pub async fn profile(user: AuthenticatedUser) -> web::Json<ProfileResponse> {
    web::Json(ProfileResponse {
        user: user.0.profile(),
    })
}
