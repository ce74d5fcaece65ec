//! Content models for the MySlide site.
//!
//! Field names serialize in camelCase to match the documents the admin panel writes.

mod app_data;
mod guidelines;
mod portfolio;
mod quote;
mod resource;

pub use app_data::*;
pub use guidelines::*;
pub use portfolio::*;
pub use quote::*;
pub use resource::*;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

/// A record type stored as independent documents in one collection.
///
/// Ids are assigned by the store, so neither the draft nor the patch carries one.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the documents live in.
    const COLLECTION: &'static str;
    /// Human readable name used in messages.
    const KIND: &'static str;

    /// Fields supplied when creating a record.
    type Draft: Serialize + DeserializeOwned + Validate + Send + Sync;
    /// Partial update; unset fields are not serialized and so left untouched.
    type Patch: Serialize + DeserializeOwned + Send + Sync;
}

/// Caller-side checks run before a draft is handed to the store.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// Fail with `ValidationFailed` when a required field is blank.
pub(crate) fn require(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationFailed(message.to_string()));
    }
    Ok(())
}

/// Serialize a draft or patch into a document field map.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Internal(format!(
            "Expected an object of fields, got {}",
            other
        ))),
    }
}
