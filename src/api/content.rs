//! Public content endpoints.

use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{AppData, GuidelinesData, Quote};
use crate::AppState;

/// GET /api/content - Everything the site renders, in one read.
pub async fn get_content(State(state): State<AppState>) -> ApiResult<AppData> {
    let data = state.gateway.fetch_all().await?;
    success(data)
}

/// GET /api/guidelines - The internal guidelines document.
pub async fn get_guidelines(State(state): State<AppState>) -> ApiResult<GuidelinesData> {
    let guidelines = state.gateway.fetch_guidelines().await?;
    success(guidelines)
}

/// Query for the current quote; `at` overrides the clock (epoch millis).
#[derive(Debug, Deserialize)]
pub struct CurrentQuoteQuery {
    pub at: Option<i64>,
}

/// The quote currently on display.
#[derive(Debug, Serialize)]
pub struct CurrentQuote {
    pub index: usize,
    pub quote: Quote,
}

/// GET /api/quotes/current - Quote selected by the rotation policy, or null.
pub async fn get_current_quote(
    State(state): State<AppState>,
    Query(query): Query<CurrentQuoteQuery>,
) -> ApiResult<Option<CurrentQuote>> {
    let now = match query.at {
        Some(millis) => DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| AppError::BadRequest(format!("Timestamp {} out of range", millis)))?,
        None => Utc::now(),
    };

    let quotes = state.gateway.list::<Quote>().await?;
    let current = state
        .rotation
        .select(&quotes, now)
        .map(|(index, quote)| CurrentQuote {
            index,
            quote: quote.clone(),
        });

    success(current)
}
