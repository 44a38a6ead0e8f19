//! In-memory `ListingRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{Listing, ListingId};

/// Listing store keyed by id.
#[derive(Default)]
pub struct InMemoryListingRepository {
    listings: RwLock<HashMap<ListingId, Listing>>,
}

impl InMemoryListingRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn list(&self) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut listings: Vec<Listing> = self.listings.read().await.values().cloned().collect();
        listings.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.cmp(&left.id))
        });
        Ok(listings)
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        Ok(self.listings.read().await.get(id).cloned())
    }

    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        self.listings
            .write()
            .await
            .insert(listing.id, listing.clone());
        Ok(())
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingRepositoryError> {
        let mut listings = self.listings.write().await;
        match listings.get_mut(&listing.id) {
            Some(stored) => {
                *stored = listing.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError> {
        Ok(self.listings.write().await.remove(id).is_some())
    }
}
