//! Driving port for property request mutations.

use async_trait::async_trait;

use crate::domain::{Error, ListingId, PropertyRequest, PropertyRequestId, User};

/// Request workflow writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRequestCommand: Send + Sync {
    /// Submit a pending request for `listing_id` on behalf of `requester`.
    async fn create(
        &self,
        requester: &User,
        listing_id: ListingId,
        message: Option<String>,
    ) -> Result<PropertyRequest, Error>;

    /// Move a request to `new_status` on behalf of an administrator.
    ///
    /// The caller must already have passed the admin check.
    async fn transition_status(
        &self,
        admin: &User,
        request_id: PropertyRequestId,
        new_status: &str,
    ) -> Result<PropertyRequest, Error>;
}
