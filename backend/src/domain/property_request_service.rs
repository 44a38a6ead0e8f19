//! Property request workflow service.
//!
//! Owns the request lifecycle: creation by regular users, status transitions
//! by administrators, and the per-identity listing view enriched with the
//! referenced listings.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    ListingRepository, PropertyRequestCommand, PropertyRequestQuery, PropertyRequestRepository,
    StatusUpdate,
};
use crate::domain::property_request::{newest_first, normalise_message};
use crate::domain::repository_errors::{
    map_listing_repository_error, map_property_request_repository_error,
};
use crate::domain::timestamps::stored_now;
use crate::domain::{
    EnrichedPropertyRequest, Error, Listing, ListingId, PropertyRequest, PropertyRequestId,
    RequestStatus, Role, User,
};

/// Workflow service implementing [`PropertyRequestCommand`] and
/// [`PropertyRequestQuery`].
pub struct PropertyRequestService<R: ?Sized, L: ?Sized> {
    requests: Arc<R>,
    listings: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized, L: ?Sized> Clone for PropertyRequestService<R, L> {
    fn clone(&self) -> Self {
        Self {
            requests: Arc::clone(&self.requests),
            listings: Arc::clone(&self.listings),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ?Sized, L: ?Sized> PropertyRequestService<R, L> {
    /// Create a new workflow service.
    pub fn new(requests: Arc<R>, listings: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            requests,
            listings,
            clock,
        }
    }
}

impl<R, L> PropertyRequestService<R, L>
where
    R: PropertyRequestRepository + ?Sized,
    L: ListingRepository + ?Sized,
{
    async fn enrich(&self, request: PropertyRequest) -> Result<EnrichedPropertyRequest, Error> {
        let property = self
            .listings
            .find_by_id(&request.listing_id)
            .await
            .map_err(map_listing_repository_error)?
            .unwrap_or_else(|| {
                debug!(listing_id = %request.listing_id, "request references a deleted listing");
                Listing::missing(request.listing_id)
            });
        Ok(EnrichedPropertyRequest { request, property })
    }
}

#[async_trait]
impl<R, L> PropertyRequestCommand for PropertyRequestService<R, L>
where
    R: PropertyRequestRepository + ?Sized,
    L: ListingRepository + ?Sized,
{
    async fn create(
        &self,
        requester: &User,
        listing_id: ListingId,
        message: Option<String>,
    ) -> Result<PropertyRequest, Error> {
        match requester.role() {
            Role::Admin => return Err(Error::forbidden("admins cannot create property requests")),
            Role::User => {}
        }

        let message = normalise_message(message.as_deref())
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let listing = self
            .listings
            .find_by_id(&listing_id)
            .await
            .map_err(map_listing_repository_error)?;
        if listing.is_none() {
            return Err(Error::not_found("property not found"));
        }

        let request =
            PropertyRequest::pending(*requester.id(), listing_id, message, stored_now(&*self.clock));
        self.requests
            .insert(&request)
            .await
            .map_err(map_property_request_repository_error)?;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            listing_id = %request.listing_id,
            "property request created"
        );
        Ok(request)
    }

    async fn transition_status(
        &self,
        admin: &User,
        request_id: PropertyRequestId,
        new_status: &str,
    ) -> Result<PropertyRequest, Error> {
        let status = new_status.parse::<RequestStatus>().map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "status", "value": new_status }))
        })?;

        let update = StatusUpdate {
            status,
            processed_by: *admin.id(),
            updated_at: stored_now(&*self.clock),
        };
        let updated = self
            .requests
            .update_status(&request_id, update)
            .await
            .map_err(map_property_request_repository_error)?
            .ok_or_else(|| Error::not_found("property request not found"))?;

        info!(
            request_id = %updated.id,
            status = %updated.status,
            processed_by = %admin.id(),
            "property request status changed"
        );
        Ok(updated)
    }
}

#[async_trait]
impl<R, L> PropertyRequestQuery for PropertyRequestService<R, L>
where
    R: PropertyRequestRepository + ?Sized,
    L: ListingRepository + ?Sized,
{
    async fn list_for_identity(
        &self,
        identity: &User,
    ) -> Result<Vec<EnrichedPropertyRequest>, Error> {
        let mut requests = match identity.role() {
            Role::User => self.requests.list_for_user(identity.id()).await,
            Role::Admin => self.requests.list_all().await,
        }
        .map_err(map_property_request_repository_error)?;
        requests.sort_by(newest_first);

        let mut enriched = Vec::with_capacity(requests.len());
        for request in requests {
            enriched.push(self.enrich(request).await?);
        }
        Ok(enriched)
    }
}

#[cfg(test)]
#[path = "property_request_service_tests.rs"]
mod tests;
