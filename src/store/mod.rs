//! Document store access.
//!
//! The store is addressed by collection name and document id. It offers list,
//! point-read, insert, partial update, merge-upsert and delete; nothing more.

mod sqlite;

#[cfg(test)]
pub(crate) mod memory;

pub use sqlite::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Field map of a stored document, without its id.
pub type Fields = Map<String, Value>;

/// A stored document and its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    /// Decode into a record type, exposing the id as the `id` field.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(fields))
    }
}

/// Collection-oriented document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection in insertion order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, AppError>;

    /// A single document, or `None` when absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError>;

    /// Insert a new document and return the id the store assigned.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, AppError>;

    /// Merge `fields` into an existing document. Fails with `NotFound` when absent.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), AppError>;

    /// Remove a document. Returns whether anything was removed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError>;

    /// Merge `fields` into a fixed-id document, creating it when absent.
    async fn set_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<(), AppError>;
}

/// Overlay `patch` onto `base`, key by key.
pub fn merge_fields(base: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        base.insert(key, value);
    }
}
