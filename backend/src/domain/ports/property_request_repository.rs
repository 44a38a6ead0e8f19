//! Driven port for property request persistence.
//!
//! Adapters own the one-pending-request-per-pair rule: inserting or
//! re-opening a request that would create a second `pending` row for the same
//! (user, listing) pair fails with
//! [`PropertyRequestRepositoryError::DuplicatePending`] atomically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{PropertyRequest, PropertyRequestId, RequestStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by property request repository adapters.
    pub enum PropertyRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "property request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "property request repository query failed: {message}",
        /// The call did not finish within the configured deadline.
        Timeout { operation: String } => "property request repository timed out during {operation}",
        /// A pending request already exists for the (user, listing) pair.
        DuplicatePending => "a pending request already exists for this user and listing",
    }
}

/// Status change applied by an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Target status.
    pub status: RequestStatus,
    /// Administrator applying the change.
    pub processed_by: UserId,
    /// Instant of the change.
    pub updated_at: DateTime<Utc>,
}

/// Property request store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRequestRepository: Send + Sync {
    /// Insert a new request.
    async fn insert(&self, request: &PropertyRequest) -> Result<(), PropertyRequestRepositoryError>;

    /// Apply a status change; `None` when no request has this id.
    async fn update_status(
        &self,
        id: &PropertyRequestId,
        update: StatusUpdate,
    ) -> Result<Option<PropertyRequest>, PropertyRequestRepositoryError>;

    /// Requests submitted by `user_id`, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PropertyRequest>, PropertyRequestRepositoryError>;

    /// Every request, newest first.
    async fn list_all(&self) -> Result<Vec<PropertyRequest>, PropertyRequestRepositoryError>;
}
