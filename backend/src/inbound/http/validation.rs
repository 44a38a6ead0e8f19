//! Shared validation helpers for inbound HTTP adapters.

use std::fmt::Display;

use actix_web::web;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::{CredentialsValidationError, Error, ListingId, PropertyRequestId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidField,
    InvalidBody,
    InvalidPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidField => "invalid_field",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidPath => "invalid_path",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_listing_id(value: &str, field: FieldName) -> Result<ListingId, Error> {
    ListingId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_request_id(value: &str, field: FieldName) -> Result<PropertyRequestId, Error> {
    PropertyRequestId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn credentials_error(err: &CredentialsValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": ErrorCode::InvalidField.as_str(),
    }))
}

pub(crate) fn invalid_body_error(reason: &dyn Display) -> Error {
    Error::invalid_request(format!("request body is invalid: {reason}")).with_details(json!({
        "code": ErrorCode::InvalidBody.as_str(),
    }))
}

/// Decode a JSON body that was read as raw bytes.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|err| invalid_body_error(&err))
}

/// JSON extractor settings answering rejected bodies with the API error payload.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| invalid_body_error(&err).into())
}

/// Path extractor settings answering rejected segments with the API error payload.
pub(crate) fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("request path is invalid: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidPath.as_str() }))
            .into()
    })
}
