//! Quote model shown in the home page hero.

use serde::{Deserialize, Serialize};

use super::{require, Record, Validate};
use crate::errors::AppError;

/// A quote with its attribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub author: String,
    /// Display hint only; inactive quotes still rotate.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Request body for creating a new quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl NewQuote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            active: true,
        }
    }
}

/// Request body for updating an existing quote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Validate for NewQuote {
    fn validate(&self) -> Result<(), AppError> {
        require(&self.text, "Quote text is required")
    }
}

impl Record for Quote {
    const COLLECTION: &'static str = "quotes";
    const KIND: &'static str = "Quote";

    type Draft = NewQuote;
    type Patch = QuotePatch;
}
