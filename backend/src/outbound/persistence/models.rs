//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations. Conversions back into the
//! domain re-run validation and report a readable message on failure.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    EmailAddress, Listing, ListingAgent, ListingDetails, ListingId, PasswordHash, PersonName,
    PhoneNumber, PropertyRequest, PropertyRequestId, RequestStatus, Role, User, UserId, UserParts,
};

use super::schema::{listings, property_requests, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            first_name: user.first_name().as_ref(),
            last_name: user.last_name().as_ref(),
            email: user.email().as_ref(),
            phone: user.phone().map(AsRef::<str>::as_ref),
            password_hash: user.password_hash().as_ref(),
            role: user.role().as_str(),
            created_at: user.created_at(),
            updated_at: user.created_at(),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |field: &str, err: &dyn std::fmt::Display| {
            format!("stored user {id} has invalid {field}: {err}")
        };
        Ok(User::new(UserParts {
            id: UserId::from_uuid(id),
            first_name: PersonName::new(&row.first_name)
                .map_err(|err| invalid("first_name", &err))?,
            last_name: PersonName::new(&row.last_name).map_err(|err| invalid("last_name", &err))?,
            email: EmailAddress::new(&row.email).map_err(|err| invalid("email", &err))?,
            phone: PhoneNumber::parse_optional(row.phone.as_deref()),
            password_hash: PasswordHash::new(row.password_hash.clone())
                .map_err(|err| invalid("password_hash", &err))?,
            role: row
                .role
                .parse::<Role>()
                .map_err(|err| invalid("role", &err))?,
            created_at: row.created_at,
        }))
    }
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// Row struct mirroring the listings table for reads and full writes.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListingRow {
    pub id: Uuid,
    pub kind: String,
    pub name: String,
    pub image: String,
    pub county: String,
    pub address: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub surface: String,
    pub year: String,
    pub price: String,
    pub latitude: f64,
    pub longitude: f64,
    pub agent_name: String,
    pub agent_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        let details = listing.details.clone();
        Self {
            id: *listing.id.as_uuid(),
            kind: details.kind,
            name: details.name,
            image: details.image,
            county: details.county,
            address: details.address,
            bedrooms: details.bedrooms,
            bathrooms: details.bathrooms,
            surface: details.surface,
            year: details.year,
            price: details.price,
            latitude: details.latitude,
            longitude: details.longitude,
            agent_name: details.agent.name,
            agent_phone: details.agent.phone,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Self {
            id: ListingId::from_uuid(row.id),
            details: ListingDetails {
                kind: row.kind,
                name: row.name,
                image: row.image,
                county: row.county,
                address: row.address,
                bedrooms: row.bedrooms,
                bathrooms: row.bathrooms,
                surface: row.surface,
                year: row.year,
                price: row.price,
                latitude: row.latitude,
                longitude: row.longitude,
                agent: ListingAgent {
                    name: row.agent_name,
                    phone: row.agent_phone,
                },
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Property requests
// ---------------------------------------------------------------------------

/// Row struct mirroring the property_requests table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = property_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PropertyRequestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub status: String,
    pub message: Option<String>,
    pub processed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by a status transition.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = property_requests)]
pub(crate) struct StatusChangeset<'a> {
    pub status: &'a str,
    pub processed_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl From<&PropertyRequest> for PropertyRequestRow {
    fn from(request: &PropertyRequest) -> Self {
        Self {
            id: *request.id.as_uuid(),
            user_id: *request.user_id.as_uuid(),
            listing_id: *request.listing_id.as_uuid(),
            status: request.status.as_str().to_owned(),
            message: request.message.clone(),
            processed_by: request.processed_by.map(|id| *id.as_uuid()),
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

impl TryFrom<PropertyRequestRow> for PropertyRequest {
    type Error = String;

    fn try_from(row: PropertyRequestRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<RequestStatus>()
            .map_err(|err| format!("stored property request {} is invalid: {err}", row.id))?;
        Ok(Self {
            id: PropertyRequestId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            listing_id: ListingId::from_uuid(row.listing_id),
            status,
            message: row.message,
            processed_by: row.processed_by.map(UserId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
