//! Property request API handlers.
//!
//! ```text
//! POST /api/requests/create {"propertyId":"<uuid>","message":"Viewing on Friday?"}
//! GET /api/requests/my-requests
//! PUT /api/requests/{id}/status {"status":"approved"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EnrichedPropertyRequest, Error, PropertyRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminUser, AuthenticatedUser};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_json_body, parse_listing_id, parse_request_id,
};

/// Body for `POST /api/requests/create`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    #[schema(example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
    pub property_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body for `PUT /api/requests/{id}/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StatusChangeBody {
    #[schema(example = "approved")]
    pub status: String,
}

/// Submit a request for a listing.
#[utoipa::path(
    post,
    path = "/api/requests/create",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request created", body = PropertyRequest),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Administrators cannot submit requests", body = Error),
        (status = 404, description = "Listing not found", body = Error),
        (status = 409, description = "A pending request already exists", body = Error),
        (status = 504, description = "Store timed out", body = Error)
    ),
    tags = ["requests"],
    operation_id = "createRequest"
)]
#[post("/requests/create")]
pub async fn create_request(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateRequestBody>,
) -> ApiResult<HttpResponse> {
    let CreateRequestBody {
        property_id,
        message,
    } = payload.into_inner();
    let listing_id = parse_listing_id(&property_id, FieldName::new("propertyId"))?;
    let request = state
        .requests
        .create(&user.into_inner(), listing_id, message)
        .await?;
    Ok(HttpResponse::Created().json(request))
}

/// Requests visible to the caller, each with its listing.
///
/// Regular users see their own requests; administrators see all of them.
#[utoipa::path(
    get,
    path = "/api/requests/my-requests",
    responses(
        (status = 200, description = "Requests, newest first", body = [EnrichedPropertyRequest]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 504, description = "Store timed out", body = Error)
    ),
    tags = ["requests"],
    operation_id = "myRequests"
)]
#[get("/requests/my-requests")]
pub async fn my_requests(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<EnrichedPropertyRequest>>> {
    let requests = state.requests_query.list_for_identity(&user.0).await?;
    Ok(web::Json(requests))
}

/// Move a request to a new status.
///
/// The body is decoded only after the caller passes the admin gate, so a
/// non-admin never learns whether their payload was well formed.
#[utoipa::path(
    put,
    path = "/api/requests/{id}/status",
    params(("id" = String, Path, description = "Request identifier")),
    request_body = StatusChangeBody,
    responses(
        (status = 200, description = "Updated request", body = PropertyRequest),
        (status = 400, description = "Unknown status or malformed id", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Request not found", body = Error),
        (status = 409, description = "Reopening conflicts with a pending request", body = Error)
    ),
    tags = ["requests"],
    operation_id = "transitionRequest"
)]
#[put("/requests/{id}/status")]
pub async fn transition_request(
    state: web::Data<HttpState>,
    admin: AdminUser,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<PropertyRequest>> {
    let request_id = parse_request_id(&path.into_inner(), FieldName::new("id"))?;
    let StatusChangeBody { status } = parse_json_body(&body)?;
    let updated = state
        .requests
        .transition_status(&admin.0, request_id, &status)
        .await?;
    Ok(web::Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{fixed_now, listing};
    use crate::domain::{ListingId, RequestStatus, Role, User};
    use crate::inbound::http::test_utils::{StubIdentities, TestPorts, user_with_role};
    use crate::inbound::http::validation::json_config;
    use actix_web::http::StatusCode;
    use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    const USER_TOKEN: &str = "user-token";
    const ADMIN_TOKEN: &str = "admin-token";

    struct Caller {
        user: User,
        admin: User,
    }

    fn callers(ports: &mut TestPorts) -> Caller {
        let caller = Caller {
            user: user_with_role(Role::User),
            admin: user_with_role(Role::Admin),
        };
        ports.identities = StubIdentities::with(USER_TOKEN, caller.user.clone())
            .and(ADMIN_TOKEN, caller.admin.clone());
        caller
    }

    async fn send(ports: TestPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(
                    web::scope("/api")
                        .app_data(json_config())
                        .service(create_request)
                        .service(my_requests)
                        .service(transition_request),
                ),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
        (AUTHORIZATION, format!("Bearer {token}"))
    }

    #[rstest]
    #[actix_web::test]
    async fn create_passes_caller_and_listing() {
        let mut ports = TestPorts::default();
        let caller = callers(&mut ports);
        let listing_id = ListingId::random();
        let expected_user = *caller.user.id();
        let created = PropertyRequest::pending(
            expected_user,
            listing_id,
            Some("Friday?".into()),
            fixed_now(),
        );
        let returned = created.clone();
        ports
            .requests
            .expect_create()
            .withf(move |user, id, message| {
                *user.id() == expected_user && *id == listing_id && message.as_deref() == Some("Friday?")
            })
            .times(1)
            .return_once(move |_, _, _| Ok(returned));

        let (status, body) = send(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/requests/create")
                .insert_header(bearer(USER_TOKEN))
                .set_json(json!({"propertyId": listing_id.to_string(), "message": "Friday?"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], created.id.to_string());
        assert_eq!(body["propertyId"], listing_id.to_string());
        assert_eq!(body["status"], "pending");
        assert!(body.get("processedBy").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn create_rejects_malformed_listing_id() {
        let mut ports = TestPorts::default();
        callers(&mut ports);
        ports.requests.expect_create().never();

        let (status, body) = send(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/requests/create")
                .insert_header(bearer(USER_TOKEN))
                .set_json(json!({"propertyId": "64b7f0c2e4"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "propertyId");
    }

    #[rstest]
    #[actix_web::test]
    async fn create_surfaces_conflicts() {
        let mut ports = TestPorts::default();
        callers(&mut ports);
        ports.requests.expect_create().return_once(|_, _, _| {
            Err(Error::conflict(
                "you already have a pending request for this property",
            ))
        });

        let (status, body) = send(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/requests/create")
                .insert_header(bearer(USER_TOKEN))
                .set_json(json!({"propertyId": ListingId::random().to_string()})),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["message"],
            "you already have a pending request for this property"
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn my_requests_embeds_the_listing() {
        let mut ports = TestPorts::default();
        let caller = callers(&mut ports);
        let property = listing("Sunny flat");
        let request = PropertyRequest::pending(*caller.user.id(), property.id, None, fixed_now());
        let entry = EnrichedPropertyRequest {
            request: request.clone(),
            property: property.clone(),
        };
        let expected_user = *caller.user.id();
        ports
            .requests_query
            .expect_list_for_identity()
            .withf(move |identity| *identity.id() == expected_user)
            .return_once(move |_| Ok(vec![entry]));

        let (status, body) = send(
            ports,
            actix_test::TestRequest::get()
                .uri("/api/requests/my-requests")
                .insert_header(bearer(USER_TOKEN)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], request.id.to_string());
        assert_eq!(body[0]["property"]["name"], "Sunny flat");
        assert_eq!(body[0]["property"]["id"], property.id.to_string());
    }

    #[rstest]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[case(Some(USER_TOKEN), StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn transition_is_admin_only(#[case] token: Option<&str>, #[case] expected: StatusCode) {
        let mut ports = TestPorts::default();
        callers(&mut ports);
        ports.requests.expect_transition_status().never();
        let mut request = actix_test::TestRequest::put()
            .uri(&format!("/api/requests/{}/status", ListingId::random()))
            .set_json(json!({"status": "approved"}));
        if let Some(token) = token {
            request = request.insert_header(bearer(token));
        }

        let (status, _) = send(ports, request).await;

        assert_eq!(status, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_transition_returns_updated_request() {
        let mut ports = TestPorts::default();
        let caller = callers(&mut ports);
        let admin_id = *caller.admin.id();
        let mut updated =
            PropertyRequest::pending(*caller.user.id(), ListingId::random(), None, fixed_now());
        updated.status = RequestStatus::Approved;
        updated.processed_by = Some(admin_id);
        let request_id = updated.id;
        let returned = updated.clone();
        ports
            .requests
            .expect_transition_status()
            .withf(move |admin, id, status| {
                *admin.id() == admin_id && *id == request_id && status == "approved"
            })
            .return_once(move |_, _, _| Ok(returned));

        let (status, body) = send(
            ports,
            actix_test::TestRequest::put()
                .uri(&format!("/api/requests/{request_id}/status"))
                .insert_header(bearer(ADMIN_TOKEN))
                .set_json(json!({"status": "approved"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "approved");
        assert_eq!(body["processedBy"], admin_id.to_string());
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_status_is_a_bad_request() {
        let mut ports = TestPorts::default();
        callers(&mut ports);
        ports.requests.expect_transition_status().return_once(|_, _, _| {
            Err(Error::invalid_request(
                "invalid status: archived; expected pending, approved or rejected",
            ))
        });

        let (status, body) = send(
            ports,
            actix_test::TestRequest::put()
                .uri(&format!("/api/requests/{}/status", ListingId::random()))
                .insert_header(bearer(ADMIN_TOKEN))
                .set_json(json!({"status": "archived"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }
    #[rstest]
    #[actix_web::test]
    async fn unreadable_create_body_uses_the_error_payload() {
        let mut ports = TestPorts::default();
        callers(&mut ports);
        ports.requests.expect_create().never();

        let (status, body) = send(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/requests/create")
                .insert_header(bearer(USER_TOKEN))
                .insert_header((CONTENT_TYPE, "application/json"))
                .set_payload("{not json"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "invalid_body");
    }

    #[rstest]
    #[actix_web::test]
    async fn status_body_without_a_status_is_invalid() {
        let mut ports = TestPorts::default();
        callers(&mut ports);
        ports.requests.expect_transition_status().never();

        let (status, body) = send(
            ports,
            actix_test::TestRequest::put()
                .uri(&format!("/api/requests/{}/status", ListingId::random()))
                .insert_header(bearer(ADMIN_TOKEN))
                .set_json(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "invalid_body");
    }

    #[rstest]
    #[actix_web::test]
    async fn role_gate_answers_before_the_status_body_is_read() {
        let mut ports = TestPorts::default();
        callers(&mut ports);
        ports.requests.expect_transition_status().never();

        let (status, body) = send(
            ports,
            actix_test::TestRequest::put()
                .uri(&format!("/api/requests/{}/status", ListingId::random()))
                .insert_header(bearer(USER_TOKEN))
                .insert_header((CONTENT_TYPE, "application/json"))
                .set_payload("{not json"),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "forbidden");
    }
}
