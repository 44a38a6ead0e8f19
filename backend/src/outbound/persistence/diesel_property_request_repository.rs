//! PostgreSQL-backed `PropertyRequestRepository` implementation using Diesel.
//!
//! The partial unique index `property_requests_one_pending_per_pair` keeps at
//! most one pending row per (user, listing). Both inserts and status updates
//! that would break it fail with
//! [`PropertyRequestRepositoryError::DuplicatePending`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    PropertyRequestRepository, PropertyRequestRepositoryError, StatusUpdate,
};
use crate::domain::{PropertyRequest, PropertyRequestId, UserId};

use super::diesel_error_mapping::{
    map_diesel_error, map_pool_error, violated_unique_constraint, with_deadline,
};
use super::models::{PropertyRequestRow, StatusChangeset};
use super::pool::{DbPool, PoolError};
use super::schema::property_requests;

const PENDING_UNIQUE_INDEX: &str = "property_requests_one_pending_per_pair";

/// Diesel-backed implementation of the `PropertyRequestRepository` port.
#[derive(Clone)]
pub struct DieselPropertyRequestRepository {
    pool: DbPool,
}

impl DieselPropertyRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PropertyRequestRepositoryError {
    map_pool_error(error)
}

fn diesel_error(error: diesel::result::Error) -> PropertyRequestRepositoryError {
    map_diesel_error(error)
}

fn map_write_error(error: diesel::result::Error) -> PropertyRequestRepositoryError {
    if violated_unique_constraint(&error) == Some(PENDING_UNIQUE_INDEX) {
        return PropertyRequestRepositoryError::duplicate_pending();
    }
    map_diesel_error(error)
}

fn rows_to_requests(
    rows: Vec<PropertyRequestRow>,
) -> Result<Vec<PropertyRequest>, PropertyRequestRepositoryError> {
    rows.into_iter()
        .map(PropertyRequest::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(PropertyRequestRepositoryError::query)
}

#[async_trait]
impl PropertyRequestRepository for DieselPropertyRequestRepository {
    async fn insert(&self, request: &PropertyRequest) -> Result<(), PropertyRequestRepositoryError> {
        with_deadline(self.pool.call_timeout(), "insert", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            diesel::insert_into(property_requests::table)
                .values(PropertyRequestRow::from(request))
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(map_write_error)
        })
        .await
    }

    async fn update_status(
        &self,
        id: &PropertyRequestId,
        update: StatusUpdate,
    ) -> Result<Option<PropertyRequest>, PropertyRequestRepositoryError> {
        with_deadline(self.pool.call_timeout(), "update_status", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let changes = StatusChangeset {
                status: update.status.as_str(),
                processed_by: *update.processed_by.as_uuid(),
                updated_at: update.updated_at,
            };
            let row: Option<PropertyRequestRow> = diesel::update(
                property_requests::table.filter(property_requests::id.eq(id.as_uuid())),
            )
            .set(&changes)
            .returning(PropertyRequestRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_write_error)?;
            row.map(PropertyRequest::try_from)
                .transpose()
                .map_err(PropertyRequestRepositoryError::query)
        })
        .await
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PropertyRequest>, PropertyRequestRepositoryError> {
        with_deadline(self.pool.call_timeout(), "list_for_user", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let rows: Vec<PropertyRequestRow> = property_requests::table
                .filter(property_requests::user_id.eq(user_id.as_uuid()))
                .order((
                    property_requests::created_at.desc(),
                    property_requests::id.desc(),
                ))
                .select(PropertyRequestRow::as_select())
                .load(&mut conn)
                .await
                .map_err(diesel_error)?;
            rows_to_requests(rows)
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<PropertyRequest>, PropertyRequestRepositoryError> {
        with_deadline(self.pool.call_timeout(), "list_all", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let rows: Vec<PropertyRequestRow> = property_requests::table
                .order((
                    property_requests::created_at.desc(),
                    property_requests::id.desc(),
                ))
                .select(PropertyRequestRow::as_select())
                .load(&mut conn)
                .await
                .map_err(diesel_error)?;
            rows_to_requests(rows)
        })
        .await
    }
}
