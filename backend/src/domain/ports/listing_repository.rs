//! Driven port for listing persistence.

use async_trait::async_trait;

use crate::domain::{Listing, ListingId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by listing repository adapters.
    pub enum ListingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "listing repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "listing repository query failed: {message}",
        /// The call did not finish within the configured deadline.
        Timeout { operation: String } => "listing repository timed out during {operation}",
    }
}

/// Listing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// All listings, newest first (`created_at` then `id`, descending).
    async fn list(&self) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Fetch a listing; `None` when it does not exist.
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Insert a new listing.
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError>;

    /// Replace a stored listing; `false` when no row matched.
    async fn update(&self, listing: &Listing) -> Result<bool, ListingRepositoryError>;

    /// Delete a listing; `false` when no row matched.
    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError>;
}
