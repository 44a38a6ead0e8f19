//! Listing catalogue handlers.
//!
//! Reads are public; writes require an administrator.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{Error, Listing, ListingDetails, ListingPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::MessageResponse;
use crate::inbound::http::validation::{FieldName, parse_listing_id};

const LISTING_ID: FieldName = FieldName::new("id");

/// All listings, newest first.
#[utoipa::path(
    get,
    path = "/api/housing/all",
    responses(
        (status = 200, description = "Listings", body = [Listing]),
        (status = 504, description = "Store timed out", body = Error)
    ),
    tags = ["housing"],
    operation_id = "listListings",
    security([])
)]
#[get("/housing/all")]
pub async fn list_listings(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Listing>>> {
    Ok(web::Json(state.listings.list().await?))
}

/// One listing by id.
#[utoipa::path(
    get,
    path = "/api/housing/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing", body = Listing),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "Listing not found", body = Error)
    ),
    tags = ["housing"],
    operation_id = "getListing",
    security([])
)]
#[get("/housing/{id}")]
pub async fn get_listing(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Listing>> {
    let id = parse_listing_id(&path.into_inner(), LISTING_ID)?;
    Ok(web::Json(state.listings.get(id).await?))
}

/// Publish a new listing.
#[utoipa::path(
    post,
    path = "/api/housing/create",
    request_body = ListingDetails,
    responses(
        (status = 201, description = "Listing created", body = Listing),
        (status = 400, description = "Missing required field", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Admin access required", body = Error)
    ),
    tags = ["housing"],
    operation_id = "createListing"
)]
#[post("/housing/create")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    payload: web::Json<ListingDetails>,
) -> ApiResult<HttpResponse> {
    let listing = state.listings.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(listing))
}

/// Apply a partial update to a listing.
#[utoipa::path(
    put,
    path = "/api/housing/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = ListingPatch,
    responses(
        (status = 200, description = "Updated listing", body = Listing),
        (status = 400, description = "Invalid update", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Listing not found", body = Error)
    ),
    tags = ["housing"],
    operation_id = "updateListing"
)]
#[put("/housing/{id}")]
pub async fn update_listing(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<String>,
    payload: web::Json<ListingPatch>,
) -> ApiResult<web::Json<Listing>> {
    let id = parse_listing_id(&path.into_inner(), LISTING_ID)?;
    Ok(web::Json(
        state.listings.update(id, payload.into_inner()).await?,
    ))
}

/// Remove a listing. Requests that point at it remain and render a placeholder.
#[utoipa::path(
    delete,
    path = "/api/housing/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Listing not found", body = Error)
    ),
    tags = ["housing"],
    operation_id = "deleteListing"
)]
#[delete("/housing/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_listing_id(&path.into_inner(), LISTING_ID)?;
    state.listings.delete(id).await?;
    Ok(web::Json(MessageResponse::new("property deleted successfully")))
}
