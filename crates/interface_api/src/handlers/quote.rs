//! Re-rating handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::dto::quote::{QuoteResponse, RequoteQuery};
use crate::{error::ApiError, AppState};

/// Re-rates an application to reproduce a target premium
///
/// Non-convergence is not an error: the response carries `convergio: false`.
pub async fn requote(
    State(state): State<AppState>,
    query: Result<Query<RequoteQuery>, QueryRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    query.validate()?;
    debug!(application_id = query.application_id, "requote requested");

    let request = query.into_request();
    let result = state.service.quote(&request).await?;
    Ok(Json(result.into()))
}
