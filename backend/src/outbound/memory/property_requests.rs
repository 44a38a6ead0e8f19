//! In-memory `PropertyRequestRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    PropertyRequestRepository, PropertyRequestRepositoryError, StatusUpdate,
};
use crate::domain::property_request::newest_first;
use crate::domain::{PropertyRequest, PropertyRequestId, RequestStatus, UserId};

/// Request store enforcing one pending request per (user, listing) pair.
#[derive(Default)]
pub struct InMemoryPropertyRequestRepository {
    requests: RwLock<HashMap<PropertyRequestId, PropertyRequest>>,
}

impl InMemoryPropertyRequestRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflicts_with_pending(
    requests: &HashMap<PropertyRequestId, PropertyRequest>,
    candidate: &PropertyRequest,
) -> bool {
    candidate.status == RequestStatus::Pending
        && requests.values().any(|other| {
            other.id != candidate.id
                && other.status == RequestStatus::Pending
                && other.user_id == candidate.user_id
                && other.listing_id == candidate.listing_id
        })
}

fn sorted(mut requests: Vec<PropertyRequest>) -> Vec<PropertyRequest> {
    requests.sort_by(newest_first);
    requests
}

#[async_trait]
impl PropertyRequestRepository for InMemoryPropertyRequestRepository {
    async fn insert(&self, request: &PropertyRequest) -> Result<(), PropertyRequestRepositoryError> {
        let mut requests = self.requests.write().await;
        if conflicts_with_pending(&requests, request) {
            return Err(PropertyRequestRepositoryError::duplicate_pending());
        }
        requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        id: &PropertyRequestId,
        update: StatusUpdate,
    ) -> Result<Option<PropertyRequest>, PropertyRequestRepositoryError> {
        let mut requests = self.requests.write().await;
        let Some(current) = requests.get(id) else {
            return Ok(None);
        };
        let mut changed = current.clone();
        changed.status = update.status;
        changed.processed_by = Some(update.processed_by);
        changed.updated_at = update.updated_at;
        if conflicts_with_pending(&requests, &changed) {
            return Err(PropertyRequestRepositoryError::duplicate_pending());
        }
        requests.insert(changed.id, changed.clone());
        Ok(Some(changed))
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PropertyRequest>, PropertyRequestRepositoryError> {
        let requests = self.requests.read().await;
        Ok(sorted(
            requests
                .values()
                .filter(|request| request.user_id == *user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<PropertyRequest>, PropertyRequestRepositoryError> {
        Ok(sorted(self.requests.read().await.values().cloned().collect()))
    }
}
