//! Housing listing model.
//!
//! Listing attributes such as price or surface are free-form strings as
//! entered by agents; they are displayed verbatim and never computed on.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Name shown for a listing that no longer exists.
pub const MISSING_LISTING_NAME: &str = "Property not found";

/// Validation errors raised when building listing drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    /// The identifier was not a UUID.
    #[error("listing id must be a valid UUID")]
    InvalidId,
    /// A required text field was blank.
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },
    /// A coordinate was not a finite number.
    #[error("{field} must be a finite number")]
    InvalidCoordinate { field: &'static str },
}

/// Listing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Parse a [`ListingId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ListingValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ListingValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Agent responsible for a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingAgent {
    /// Agent name.
    #[schema(example = "Maria Ionescu")]
    pub name: String,
    /// Agent phone.
    #[schema(example = "0740 123 456")]
    pub phone: String,
}

/// Mutable listing attributes shared by creation and storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingDetails {
    /// Property type, such as `apartment` or `house`.
    #[serde(rename = "type")]
    #[schema(example = "apartment")]
    pub kind: String,
    /// Display name.
    #[schema(example = "Sunny two-room flat")]
    pub name: String,
    /// Image URL.
    pub image: String,
    /// County.
    #[schema(example = "Cluj")]
    pub county: String,
    /// Street address.
    pub address: String,
    /// Number of bedrooms as entered.
    pub bedrooms: String,
    /// Number of bathrooms as entered.
    pub bathrooms: String,
    /// Usable surface as entered.
    pub surface: String,
    /// Construction year as entered.
    pub year: String,
    /// Asking price as entered.
    #[schema(example = "95000 EUR")]
    pub price: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Listing agent.
    pub agent: ListingAgent,
}

impl ListingDetails {
    /// Check the required fields and coordinates.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::ListingDetails;
    ///
    /// let details = ListingDetails {
    ///     kind: "house".into(),
    ///     name: "Cottage".into(),
    ///     address: "1 Main St".into(),
    ///     price: "120000".into(),
    ///     ..ListingDetails::default()
    /// };
    /// assert!(details.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ListingValidationError> {
        let required = [
            ("type", &self.kind),
            ("name", &self.name),
            ("address", &self.address),
            ("price", &self.price),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ListingValidationError::MissingField { field: *field });
        }
        for (field, value) in [("latitude", self.latitude), ("longitude", self.longitude)] {
            if !value.is_finite() {
                return Err(ListingValidationError::InvalidCoordinate { field });
            }
        }
        Ok(())
    }
}

/// Partial update applied by administrators; absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    /// Property type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Image URL.
    pub image: Option<String>,
    /// County.
    pub county: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Bedrooms.
    pub bedrooms: Option<String>,
    /// Bathrooms.
    pub bathrooms: Option<String>,
    /// Surface.
    pub surface: Option<String>,
    /// Construction year.
    pub year: Option<String>,
    /// Asking price.
    pub price: Option<String>,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Listing agent.
    pub agent: Option<ListingAgent>,
}

impl ListingPatch {
    /// Apply present fields onto `details`.
    pub fn apply_to(self, details: &mut ListingDetails) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        set(&mut details.kind, self.kind);
        set(&mut details.name, self.name);
        set(&mut details.image, self.image);
        set(&mut details.county, self.county);
        set(&mut details.address, self.address);
        set(&mut details.bedrooms, self.bedrooms);
        set(&mut details.bathrooms, self.bathrooms);
        set(&mut details.surface, self.surface);
        set(&mut details.year, self.year);
        set(&mut details.price, self.price);
        set(&mut details.latitude, self.latitude);
        set(&mut details.longitude, self.longitude);
        set(&mut details.agent, self.agent);
    }
}

/// Stored housing listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Listing identifier.
    #[schema(value_type = String, example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
    pub id: ListingId,
    /// Listing attributes.
    #[serde(flatten)]
    #[schema(inline)]
    pub details: ListingDetails,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Placeholder returned when a request references a deleted listing.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Listing, ListingId, MISSING_LISTING_NAME};
    ///
    /// let placeholder = Listing::missing(ListingId::random());
    /// assert_eq!(placeholder.details.name, MISSING_LISTING_NAME);
    /// assert!(placeholder.details.address.is_empty());
    /// ```
    #[must_use]
    pub fn missing(id: ListingId) -> Self {
        Self {
            id,
            details: ListingDetails {
                name: MISSING_LISTING_NAME.to_owned(),
                ..ListingDetails::default()
            },
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}
