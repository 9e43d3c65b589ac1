//! GET /api/v1/companies and /api/v1/companies/{id}: the prospect catalog.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use prospector_core::CompanyProfile;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

pub(super) async fn list_companies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CompanyProfile>>> {
    Json(ApiResponse::new(state.catalog.companies.clone(), req_id.0))
}

pub(super) async fn get_company(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<u32>,
) -> Result<Json<ApiResponse<CompanyProfile>>, ApiError> {
    let company = state
        .catalog
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "company not found"))?;

    Ok(Json(ApiResponse::new(company, req_id.0)))
}
