//! Stored application handlers

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::ApplicationId;

use crate::dto::application::{StoredQuoteResponse, StoredTaxResponse};
use crate::{error::ApiError, AppState};

/// Gets the quote on file for an application
pub async fn get_stored_quote(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StoredQuoteResponse>, ApiError> {
    let quote = state.service.stored_quote(ApplicationId::new(id)).await?;
    Ok(Json(quote.into()))
}

/// Lists the tax lines on file for an application
pub async fn get_stored_taxes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<StoredTaxResponse>>, ApiError> {
    let rules = state.service.stored_taxes(ApplicationId::new(id)).await?;
    Ok(Json(rules.into_iter().map(Into::into).collect()))
}
