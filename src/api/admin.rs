//! Admin mutation endpoints.
//!
//! Handlers are generic over the record type and routed once per collection.
//! None of them returns refreshed content: clients reload with `GET /api/content`.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::models::{Record, SaveGuidelinesRequest, Validate};
use crate::session::Session;
use crate::AppState;

/// Id of a newly created record.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

/// POST /api/admin/{collection} - Validate and insert a new record.
pub async fn create_record<R: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(draft): Json<R::Draft>,
) -> ApiResult<Created> {
    // Rejected drafts never reach the store
    draft.validate()?;

    let id = state.gateway.create::<R>(&draft).await?;
    tracing::debug!("{} {} created by {}", R::KIND, id, session.username);
    success(Created { id })
}

/// PATCH /api/admin/{collection}/{id} - Merge the given fields into a record.
pub async fn update_record<R: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(patch): Json<R::Patch>,
) -> ApiResult<()> {
    state.gateway.update::<R>(&id, &patch).await?;
    tracing::debug!("{} {} updated by {}", R::KIND, id, session.username);
    success(())
}

/// DELETE /api/admin/{collection}/{id} - Remove a record; absent ids succeed.
pub async fn delete_record<R: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.gateway.delete::<R>(&id).await?;
    tracing::debug!("{} {} deleted by {}", R::KIND, id, session.username);
    success(())
}

/// PUT /api/admin/guidelines - Replace the guidelines body.
pub async fn save_guidelines(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<SaveGuidelinesRequest>,
) -> ApiResult<()> {
    state.gateway.save_guidelines(&request.content).await?;
    tracing::debug!("Guidelines saved by {}", session.username);
    success(())
}
