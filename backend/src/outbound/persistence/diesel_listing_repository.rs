//! PostgreSQL-backed `ListingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{Listing, ListingId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, with_deadline};
use super::models::ListingRow;
use super::pool::{DbPool, PoolError};
use super::schema::listings;

/// Diesel-backed implementation of the `ListingRepository` port.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ListingRepositoryError {
    map_pool_error(error)
}

fn diesel_error(error: diesel::result::Error) -> ListingRepositoryError {
    map_diesel_error(error)
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn list(&self) -> Result<Vec<Listing>, ListingRepositoryError> {
        with_deadline(self.pool.call_timeout(), "list", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let rows: Vec<ListingRow> = listings::table
                .order((listings::created_at.desc(), listings::id.desc()))
                .select(ListingRow::as_select())
                .load(&mut conn)
                .await
                .map_err(diesel_error)?;
            Ok(rows.into_iter().map(Listing::from).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        with_deadline(self.pool.call_timeout(), "find_by_id", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let row: Option<ListingRow> = listings::table
                .filter(listings::id.eq(id.as_uuid()))
                .select(ListingRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;
            Ok(row.map(Listing::from))
        })
        .await
    }

    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        with_deadline(self.pool.call_timeout(), "insert", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            diesel::insert_into(listings::table)
                .values(ListingRow::from(listing))
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(diesel_error)
        })
        .await
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingRepositoryError> {
        with_deadline(self.pool.call_timeout(), "update", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let changes = ListingRow::from(listing);
            let updated_rows = diesel::update(listings::table.filter(listings::id.eq(changes.id)))
                .set(&changes)
                .execute(&mut conn)
                .await
                .map_err(diesel_error)?;
            Ok(updated_rows > 0)
        })
        .await
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError> {
        with_deadline(self.pool.call_timeout(), "delete", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let deleted_rows = diesel::delete(listings::table.filter(listings::id.eq(id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(diesel_error)?;
            Ok(deleted_rows > 0)
        })
        .await
    }
}
