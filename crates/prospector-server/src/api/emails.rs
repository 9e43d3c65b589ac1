//! POST /api/v1/emails/batch: one outreach email per saved analysis.

use std::collections::HashSet;

use axum::{extract::State, Extension, Json};
use prospector_core::{BatchEmailResult, BatchEntity};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, map_synth_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BatchEmailRequest {
    #[serde(default)]
    pub analysis_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BatchEmailResponse {
    pub emails: Vec<BatchEmailResult>,
    /// Requested ids with no usable saved analysis.
    pub missing_ids: Vec<i64>,
}

pub(super) async fn generate_batch_emails(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<BatchEmailRequest>,
) -> Result<Json<ApiResponse<BatchEmailResponse>>, ApiError> {
    if body.analysis_ids.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "analysisIds must be a non-empty array",
        ));
    }

    let records = prospector_db::get_analyses_by_ids(&state.pool, &body.analysis_ids)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    if records.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            "no saved analyses found for the given ids",
        ));
    }

    let missing_ids = missing_ids(&body.analysis_ids, records.iter().map(|r| r.id));
    let entities: Vec<BatchEntity> = records
        .into_iter()
        .map(|r| BatchEntity::new(r.company_name, r.analysis_data))
        .collect();

    let emails = state
        .synth
        .generate_batch_emails(&entities)
        .await
        .map_err(|e| map_synth_error(req_id.0.clone(), &e))?;

    tracing::info!(
        requested = body.analysis_ids.len(),
        generated = emails.len(),
        "generated batch emails"
    );

    Ok(Json(ApiResponse::new(
        BatchEmailResponse {
            emails,
            missing_ids,
        },
        req_id.0,
    )))
}

/// Requested ids absent from `found`, each reported once in request order.
fn missing_ids(requested: &[i64], found: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut seen: HashSet<i64> = found.collect();
    requested
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}
