//! Saved analysis handlers: list, save, fetch, favorite, delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use prospector_core::CompanyAnalysis;
use prospector_db::{AnalysisSummary, CreatedAnalysis, PersistedAnalysisRecord};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SaveAnalysisRequest {
    pub company_name: Option<String>,
    pub analysis_data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FavoriteRequest {
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FavoriteResponse {
    pub id: i64,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct DeletedResponse {
    pub id: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(super) async fn list_analyses(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<AnalysisSummary>>>, ApiError> {
    let rows = prospector_db::list_analyses(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(rows, req_id.0)))
}

/// POST /api/v1/analyses: save an analysis produced earlier.
pub(super) async fn create_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SaveAnalysisRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedAnalysis>>), ApiError> {
    let rid = &req_id.0;

    let company_name = body
        .company_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::new(rid, "validation_error", "companyName is required"))?;

    let raw = body
        .analysis_data
        .ok_or_else(|| ApiError::new(rid, "validation_error", "analysisData is required"))?;
    let analysis: CompanyAnalysis = serde_json::from_value(raw).map_err(|e| {
        ApiError::new(
            rid,
            "validation_error",
            format!("analysisData is not a valid analysis: {e}"),
        )
    })?;

    let created = prospector_db::create_analysis(&state.pool, company_name, &analysis)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(created, req_id.0)),
    ))
}

pub(super) async fn get_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PersistedAnalysisRecord>>, ApiError> {
    let record = prospector_db::get_analysis(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(record, req_id.0)))
}

pub(super) async fn set_favorite(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<FavoriteRequest>,
) -> Result<Json<ApiResponse<FavoriteResponse>>, ApiError> {
    prospector_db::set_favorite(&state.pool, id, body.is_favorite)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        FavoriteResponse {
            id,
            is_favorite: body.is_favorite,
        },
        req_id.0,
    )))
}

pub(super) async fn delete_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    prospector_db::delete_analysis(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(DeletedResponse { id }, req_id.0)))
}
