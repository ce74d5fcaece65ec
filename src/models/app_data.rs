//! Aggregate read view of all site content.

use serde::{Deserialize, Serialize};

use super::{GuidelinesData, Quote, Resource, SlideWork};

/// Everything the public site renders, assembled by one combined fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub quotes: Vec<Quote>,
    pub resources: Vec<Resource>,
    pub portfolio: Vec<SlideWork>,
    pub guidelines: GuidelinesData,
}
