//! Identity extractors for HTTP handlers.
//!
//! [`AuthenticatedUser`] resolves the caller from the session token and
//! hands the account to the handler as an explicit argument. [`AdminUser`]
//! runs the same resolution and then requires the admin role, so an
//! anonymous caller on an admin route always sees `401`, never `403`.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, User};

use super::session::AUTH_COOKIE;
use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the raw session token from the request.
///
/// The `Authorization` header wins over the cookie. A header without the
/// `Bearer ` prefix is taken verbatim.
pub(crate) fn extract_token(req: &HttpRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|raw| raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw).trim())
        .filter(|token| !token.is_empty())
        .map(str::to_owned);

    from_header.or_else(|| {
        req.cookie(AUTH_COOKIE)
            .map(|cookie| cookie.value().trim().to_owned())
            .filter(|token| !token.is_empty())
    })
}

async fn resolve_identity(
    state: Option<web::Data<HttpState>>,
    token: Option<String>,
) -> Result<User, Error> {
    let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let Some(token) = token else {
        debug!("request carried no session token");
        return Err(Error::unauthorized("no token provided"));
    };
    state.identities.resolve(&token).await
}

/// Caller identity resolved from the session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    /// Consume the wrapper.
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = extract_token(req);
        Box::pin(async move {
            resolve_identity(state, token)
                .await
                .map(AuthenticatedUser)
                .map_err(actix_web::Error::from)
        })
    }
}

/// Caller identity that passed the admin role check.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl AdminUser {
    /// Consume the wrapper.
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = extract_token(req);
        Box::pin(async move {
            let user = resolve_identity(state, token).await?;
            if !user.is_admin() {
                debug!(user_id = %user.id(), "admin route refused");
                return Err(Error::forbidden("admin access required").into());
            }
            Ok(AdminUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::Role;
    use crate::inbound::http::test_utils::{StubIdentities, state_with_identities, user_with_role};

    #[rstest]
    #[case(Some("Bearer header-token"), Some("cookie-token"), Some("header-token"))]
    #[case(Some("raw-token"), None, Some("raw-token"))]
    #[case(None, Some("cookie-token"), Some("cookie-token"))]
    #[case(Some("Bearer   "), Some("cookie-token"), Some("cookie-token"))]
    #[case(None, None, None)]
    fn token_sources_are_ranked(
        #[case] header: Option<&str>,
        #[case] cookie: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let mut request = actix_test::TestRequest::default();
        if let Some(header) = header {
            request = request.insert_header((AUTHORIZATION, header));
        }
        if let Some(cookie) = cookie {
            request = request.cookie(Cookie::new(AUTH_COOKIE, cookie));
        }
        let req = request.to_http_request();

        assert_eq!(extract_token(&req).as_deref(), expected);
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.0.email().as_ref().to_owned())
    }

    async fn admin_only(_admin: AdminUser) -> HttpResponse {
        HttpResponse::NoContent().finish()
    }

    async fn call(
        path: &str,
        token: Option<&str>,
        identities: StubIdentities,
    ) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_identities(identities)))
                .route("/me", web::get().to(whoami))
                .route("/admin", web::get().to(admin_only)),
        )
        .await;
        let mut request = actix_test::TestRequest::get().uri(path);
        if let Some(token) = token {
            request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_token_is_unauthorised() {
        let (status, body) = call("/me", None, StubIdentities::default()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "no token provided");
    }

    #[rstest]
    #[actix_web::test]
    async fn resolver_failures_pass_through() {
        let (status, body) = call("/me", Some("forged"), StubIdentities::default()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid token");
    }

    #[rstest]
    #[actix_web::test]
    async fn resolved_user_reaches_the_handler() {
        let user = user_with_role(Role::User);
        let identities = StubIdentities::with("good", user.clone());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_identities(identities)))
                .route("/me", web::get().to(whoami)),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .uri("/me")
            .cookie(Cookie::new(AUTH_COOKIE, "good"))
            .to_request();

        let body = actix_test::call_and_read_body(&app, request).await;

        assert_eq!(body, user.email().as_ref().as_bytes());
    }

    #[rstest]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[case(Some(Role::User), StatusCode::FORBIDDEN)]
    #[case(Some(Role::Admin), StatusCode::NO_CONTENT)]
    #[actix_web::test]
    async fn admin_gate_orders_checks(#[case] role: Option<Role>, #[case] expected: StatusCode) {
        let identities = match role {
            Some(role) => StubIdentities::with("token", user_with_role(role)),
            None => StubIdentities::default(),
        };
        let token = role.map(|_| "token");

        let (status, body) = call("/admin", token, identities).await;

        assert_eq!(status, expected);
        if expected == StatusCode::FORBIDDEN {
            assert_eq!(body["message"], "admin access required");
        }
    }
}
