//! Driving port for property request reads.

use async_trait::async_trait;

use crate::domain::{EnrichedPropertyRequest, Error, User};

/// Request workflow reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRequestQuery: Send + Sync {
    /// Requests visible to `identity`, newest first, each with its listing.
    ///
    /// Users see their own requests; administrators see all of them.
    async fn list_for_identity(
        &self,
        identity: &User,
    ) -> Result<Vec<EnrichedPropertyRequest>, Error>;
}
