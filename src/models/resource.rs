//! Resource model: an external design link card.

use serde::{Deserialize, Serialize};

use super::{require, Record, Validate};
use crate::errors::AppError;

/// A curated external resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub image: String,
    /// Absent on older records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource {
    /// Description, or the empty string when the record has none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Request body for creating a new resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for updating an existing resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for NewResource {
    fn validate(&self) -> Result<(), AppError> {
        require(&self.title, "Resource title is required")?;
        require(&self.url, "Resource url is required")
    }
}

impl Record for Resource {
    const COLLECTION: &'static str = "resources";
    const KIND: &'static str = "Resource";

    type Draft = NewResource;
    type Patch = ResourcePatch;
}
