//! Driving port for the listing catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingDetails, ListingId, ListingPatch};

/// Listing reads and administrator writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingCatalogue: Send + Sync {
    /// All listings, newest first.
    async fn list(&self) -> Result<Vec<Listing>, Error>;

    /// A single listing.
    async fn get(&self, id: ListingId) -> Result<Listing, Error>;

    /// Create a listing from validated details.
    async fn create(&self, details: ListingDetails) -> Result<Listing, Error>;

    /// Apply a partial update.
    async fn update(&self, id: ListingId, patch: ListingPatch) -> Result<Listing, Error>;

    /// Remove a listing. Requests that reference it survive.
    async fn delete(&self, id: ListingId) -> Result<(), Error>;
}
