//! Property request aggregate and its status lifecycle.
//!
//! A request links one account to one listing. It starts `pending` and an
//! administrator moves it to any status. At most one `pending` request may
//! exist per (user, listing) pair; the store enforces that rule.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Listing, ListingId, UserId};

/// Maximum length of the free-text message attached to a request.
pub const REQUEST_MESSAGE_MAX: usize = 2000;

/// Validation errors for property request values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyRequestValidationError {
    /// The identifier was not a UUID.
    #[error("property request id must be a valid UUID")]
    InvalidId,
    /// The status was not one of `pending`, `approved` or `rejected`.
    #[error("invalid status: {value}; expected pending, approved or rejected")]
    UnknownStatus { value: String },
    /// The message exceeded [`REQUEST_MESSAGE_MAX`] characters.
    #[error("message must be at most {max} characters")]
    MessageTooLong { max: usize },
}

/// Property request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyRequestId(Uuid);

impl PropertyRequestId {
    /// Parse a [`PropertyRequestId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PropertyRequestValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| PropertyRequestValidationError::InvalidId)
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

impl fmt::Display for PropertyRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of a property request.
///
/// # Examples
/// ```
/// use backend::domain::RequestStatus;
///
/// assert_eq!("approved".parse::<RequestStatus>(), Ok(RequestStatus::Approved));
/// assert!("APPROVED".parse::<RequestStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting an administrator decision.
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Declined by an administrator.
    Rejected,
}

impl RequestStatus {
    /// Stable storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = PropertyRequestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(PropertyRequestValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Normalise an optional request message: trimmed, blank becomes absent.
pub fn normalise_message(
    message: Option<&str>,
) -> Result<Option<String>, PropertyRequestValidationError> {
    let Some(trimmed) = message.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > REQUEST_MESSAGE_MAX {
        return Err(PropertyRequestValidationError::MessageTooLong {
            max: REQUEST_MESSAGE_MAX,
        });
    }
    Ok(Some(trimmed.to_owned()))
}

/// A user's request to view or acquire a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    /// Request identifier.
    #[schema(value_type = String, example = "9b2a4c1e-6f0d-4a57-b1de-3c2f7f8a9e10")]
    pub id: PropertyRequestId,
    /// Account that submitted the request.
    #[schema(value_type = String)]
    pub user_id: UserId,
    /// Listing the request refers to.
    #[schema(value_type = String)]
    #[serde(rename = "propertyId")]
    pub listing_id: ListingId,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// Optional note from the requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Administrator who last changed the status.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub processed_by: Option<UserId>,
    /// Submission instant.
    pub created_at: DateTime<Utc>,
    /// Last status change instant.
    pub updated_at: DateTime<Utc>,
}

impl PropertyRequest {
    /// Build a fresh `pending` request stamped at `now`.
    #[must_use]
    pub fn pending(
        user_id: UserId,
        listing_id: ListingId,
        message: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PropertyRequestId::random(),
            user_id,
            listing_id,
            status: RequestStatus::Pending,
            message,
            processed_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Listing order for request views: newest first, ties broken by id.
pub fn newest_first(left: &PropertyRequest, right: &PropertyRequest) -> std::cmp::Ordering {
    right
        .created_at
        .cmp(&left.created_at)
        .then_with(|| right.id.cmp(&left.id))
}

/// Request paired with the listing it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPropertyRequest {
    /// The request.
    #[serde(flatten)]
    #[schema(inline)]
    pub request: PropertyRequest,
    /// The listing, or a placeholder when it has been deleted.
    pub property: Listing,
}
