//! POST /api/v1/analyze: run a fresh analysis for one company.

use axum::{extract::State, Extension, Json};
use prospector_core::{
    estimate_roi, score_prospect, CompanyAnalysis, CompanyProfile, RoiEstimate, RoiInputs,
    ScoreCard,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeRequest {
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeResponse {
    pub company_name: String,
    pub analysis: CompanyAnalysis,
    /// Catalog entry, when the company is a known prospect.
    pub company: Option<CompanyProfile>,
    pub score_card: Option<ScoreCard>,
    /// Default-assumption ROI estimate for the catalogued fleet size.
    pub roi: Option<RoiEstimate>,
}

/// Always 200 for a valid request; upstream failures yield the degraded analysis.
pub(super) async fn analyze_company(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let company_name = body
        .company_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                "companyName is required",
            )
        })?
        .to_string();

    let analysis = state.synth.synthesize_single(&company_name).await;

    let company = state.catalog.find_by_name(&company_name).cloned();
    let pain_points = (!analysis.is_degraded()).then_some(analysis.pain_points.as_slice());
    let score_card = company.as_ref().map(|c| score_prospect(c, pain_points));
    let roi = company
        .as_ref()
        .map(|c| estimate_roi(&RoiInputs::for_fleet(c.fleet_size)));

    Ok(Json(ApiResponse::new(
        AnalyzeResponse {
            company_name,
            analysis,
            company,
            score_card,
            roi,
        },
        req_id.0,
    )))
}
