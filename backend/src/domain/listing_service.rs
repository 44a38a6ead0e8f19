//! Listing catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{ListingCatalogue, ListingRepository};
use crate::domain::repository_errors::map_listing_repository_error;
use crate::domain::timestamps::stored_now;
use crate::domain::{Error, Listing, ListingDetails, ListingId, ListingPatch, ListingValidationError};

fn validation_error(err: &ListingValidationError) -> Error {
    let field = match err {
        ListingValidationError::MissingField { field }
        | ListingValidationError::InvalidCoordinate { field } => *field,
        ListingValidationError::InvalidId => "id",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn listing_not_found(id: ListingId) -> Error {
    Error::not_found("property not found").with_details(json!({ "id": id.to_string() }))
}

/// Listing service implementing [`ListingCatalogue`].
pub struct ListingService<L: ?Sized> {
    listings: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L: ?Sized> Clone for ListingService<L> {
    fn clone(&self) -> Self {
        Self {
            listings: Arc::clone(&self.listings),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<L: ?Sized> ListingService<L> {
    /// Create a new listing service.
    pub fn new(listings: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self { listings, clock }
    }
}

#[async_trait]
impl<L> ListingCatalogue for ListingService<L>
where
    L: ListingRepository + ?Sized,
{
    async fn list(&self) -> Result<Vec<Listing>, Error> {
        self.listings
            .list()
            .await
            .map_err(map_listing_repository_error)
    }

    async fn get(&self, id: ListingId) -> Result<Listing, Error> {
        self.listings
            .find_by_id(&id)
            .await
            .map_err(map_listing_repository_error)?
            .ok_or_else(|| listing_not_found(id))
    }

    async fn create(&self, details: ListingDetails) -> Result<Listing, Error> {
        details.validate().map_err(|err| validation_error(&err))?;
        let now = stored_now(&*self.clock);
        let listing = Listing {
            id: ListingId::random(),
            details,
            created_at: now,
            updated_at: now,
        };
        self.listings
            .insert(&listing)
            .await
            .map_err(map_listing_repository_error)?;
        info!(listing_id = %listing.id, "listing created");
        Ok(listing)
    }

    async fn update(&self, id: ListingId, patch: ListingPatch) -> Result<Listing, Error> {
        let mut listing = self.get(id).await?;
        patch.apply_to(&mut listing.details);
        listing
            .details
            .validate()
            .map_err(|err| validation_error(&err))?;
        listing.updated_at = stored_now(&*self.clock);

        let updated = self
            .listings
            .update(&listing)
            .await
            .map_err(map_listing_repository_error)?;
        if !updated {
            return Err(listing_not_found(id));
        }
        info!(listing_id = %id, "listing updated");
        Ok(listing)
    }

    async fn delete(&self, id: ListingId) -> Result<(), Error> {
        let removed = self
            .listings
            .delete(&id)
            .await
            .map_err(map_listing_repository_error)?;
        if !removed {
            return Err(listing_not_found(id));
        }
        info!(listing_id = %id, "listing deleted");
        Ok(())
    }
}
