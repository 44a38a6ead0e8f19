//! In-memory marketplace wired through the real services and HTTP routes.
//!
//! Each [`Marketplace`] owns its own stores, so suites never share state.
//! Password hashing uses tiny Argon2 costs to keep the suites fast.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, SET_COOKIE};
use actix_web::{App, test as actix_test, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use backend::Trace;
use backend::domain::ports::{
    ListingRepository, PasswordHasher, PropertyRequestRepository, TokenService, UserRepository,
};
use backend::domain::{
    AccountService, EmailAddress, ListingService, PropertyRequestService, TOKEN_SECRET_MIN_LEN,
    TokenSecret,
};
use backend::inbound::http::configure_api;
use backend::inbound::http::session::SessionSettings;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::{
    InMemoryListingRepository, InMemoryPropertyRequestRepository, InMemoryUserRepository,
};
use backend::outbound::security::{Argon2PasswordHasher, JwtTokenService};

pub(crate) const ADMIN_EMAIL: &str = "admin@gator.test";
pub(crate) const ADMIN_PASSWORD: &str = "admin-password";
pub(crate) const USER_PASSWORD: &str = "secret1";

/// Captured response.
pub(crate) struct Reply {
    pub(crate) status: StatusCode,
    pub(crate) body: Value,
    pub(crate) cookies: Vec<String>,
}

/// Shared HTTP state over fresh in-memory stores.
pub(crate) struct Marketplace {
    state: web::Data<HttpState>,
}

fn fast_hasher() -> Arc<dyn PasswordHasher> {
    let params = argon2::Params::new(256, 1, 1, None).expect("valid argon2 params");
    Arc::new(Argon2PasswordHasher::with_params(params))
}

impl Marketplace {
    /// Build the stores and services, provisioning the administrator.
    pub(crate) async fn start() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let listings: Arc<dyn ListingRepository> = Arc::new(InMemoryListingRepository::new());
        let requests: Arc<dyn PropertyRequestRepository> =
            Arc::new(InMemoryPropertyRequestRepository::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
            &TokenSecret::new(vec![42_u8; TOKEN_SECRET_MIN_LEN]),
            chrono::Duration::hours(1),
            clock.clone(),
        ));

        let accounts = Arc::new(AccountService::new(
            users,
            fast_hasher(),
            tokens,
            clock.clone(),
        ));
        let admin_email = EmailAddress::new(ADMIN_EMAIL).expect("valid admin email");
        accounts
            .ensure_admin(&admin_email, ADMIN_PASSWORD)
            .await
            .expect("admin provisioned");

        let request_service = Arc::new(PropertyRequestService::new(
            requests,
            listings.clone(),
            clock.clone(),
        ));
        let listing_service = Arc::new(ListingService::new(listings, clock));

        let state = HttpState::new(
            HttpStatePorts {
                accounts: accounts.clone(),
                identities: accounts,
                requests: request_service.clone(),
                requests_query: request_service,
                listings: listing_service,
            },
            SessionSettings::new(
                chrono::Duration::hours(1),
                false,
                actix_web::cookie::SameSite::Lax,
            ),
        );
        Self {
            state: web::Data::new(state),
        }
    }

    /// Dispatch `request` through the `/api` routes.
    pub(crate) async fn send(&self, request: actix_test::TestRequest) -> Reply {
        let app = actix_test::init_service(
            App::new()
                .app_data(self.state.clone())
                .wrap(Trace)
                .configure(configure_api),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect();
        let bytes = actix_test::read_body(response).await;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Reply {
            status,
            body,
            cookies,
        }
    }

    /// Register a regular account and return its token.
    pub(crate) async fn register(&self, email: &str) -> String {
        let reply = self
            .send(
                actix_test::TestRequest::post()
                    .uri("/api/users/register")
                    .set_json(json!({
                        "firstName": "Grace",
                        "lastName": "Hopper",
                        "email": email,
                        "password": USER_PASSWORD
                    })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "register: {}", reply.body);
        token_of(&reply)
    }

    /// Log in and return the issued token.
    pub(crate) async fn login(&self, email: &str, password: &str) -> String {
        let reply = self
            .send(
                actix_test::TestRequest::post()
                    .uri("/api/users/login")
                    .set_json(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK, "login: {}", reply.body);
        token_of(&reply)
    }

    pub(crate) async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Publish a listing as the administrator and return its id.
    pub(crate) async fn publish_listing(&self, admin_token: &str, name: &str) -> String {
        let reply = self
            .send(
                with_bearer(actix_test::TestRequest::post(), admin_token)
                    .uri("/api/housing/create")
                    .set_json(json!({
                        "type": "apartment",
                        "name": name,
                        "county": "Cluj",
                        "address": "Strada Memorandumului 28",
                        "price": "95000 EUR",
                        "latitude": 46.77,
                        "longitude": 23.59
                    })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "publish: {}", reply.body);
        string_field(&reply.body, "id")
    }

    /// Submit a request for `listing_id` as the holder of `token`.
    pub(crate) async fn request_viewing(&self, token: &str, listing_id: &str) -> Reply {
        self.send(
            with_bearer(actix_test::TestRequest::post(), token)
                .uri("/api/requests/create")
                .set_json(json!({ "propertyId": listing_id, "message": "Is it still free?" })),
        )
        .await
    }

    /// Change a request status as the holder of `token`.
    pub(crate) async fn set_status(&self, token: Option<&str>, request_id: &str, status: &str) -> Reply {
        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/requests/{request_id}/status"))
            .set_json(json!({ "status": status }));
        let request = match token {
            Some(token) => with_bearer(request, token),
            None => request,
        };
        self.send(request).await
    }

    pub(crate) async fn my_requests(&self, token: &str) -> Reply {
        self.send(
            with_bearer(actix_test::TestRequest::get(), token).uri("/api/requests/my-requests"),
        )
        .await
    }
}

pub(crate) fn with_bearer(request: actix_test::TestRequest, token: &str) -> actix_test::TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}

pub(crate) fn string_field(body: &Value, field: &str) -> String {
    body.get(field)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing {field} in {body}"))
        .to_owned()
}

fn token_of(reply: &Reply) -> String {
    string_field(&reply.body, "token")
}
