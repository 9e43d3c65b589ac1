//! Saved company analyses.
//!
//! Analyses are stored as JSONB so that the payload shape can evolve without
//! migrations; rows are decoded into [`CompanyAnalysis`] on read.

use chrono::{DateTime, Utc};
use prospector_core::CompanyAnalysis;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::DbError;

/// Number of characters of the stored JSON shown in list views.
const PREVIEW_CHARS: i32 = 200;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedAnalysisRow {
    pub id: i64,
    pub company_name: String,
    pub analysis_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub is_favorite: bool,
}

/// A saved analysis with its payload decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAnalysisRecord {
    pub id: i64,
    pub company_name: String,
    pub analysis_data: CompanyAnalysis,
    pub timestamp: DateTime<Utc>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAnalysis {
    pub id: i64,
    pub company_name: String,
    pub timestamp: DateTime<Utc>,
}

/// List-view row: metadata plus a short prefix of the stored JSON.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub id: i64,
    pub company_name: String,
    pub timestamp: DateTime<Utc>,
    pub is_favorite: bool,
    pub preview: String,
}

impl TryFrom<SavedAnalysisRow> for PersistedAnalysisRecord {
    type Error = DbError;

    fn try_from(row: SavedAnalysisRow) -> Result<Self, Self::Error> {
        let analysis_data = serde_json::from_value(row.analysis_data)
            .map_err(|source| DbError::CorruptPayload { id: row.id, source })?;
        Ok(Self {
            id: row.id,
            company_name: row.company_name,
            analysis_data,
            timestamp: row.created_at,
            is_favorite: row.is_favorite,
        })
    }
}

/// Decode rows, dropping (and logging) any whose payload is not a valid analysis.
#[must_use]
pub fn decode_records(rows: Vec<SavedAnalysisRow>) -> Vec<PersistedAnalysisRecord> {
    rows.into_iter()
        .filter_map(|row| match PersistedAnalysisRecord::try_from(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "skipping saved analysis with corrupt payload");
                None
            }
        })
        .collect()
}

/// Save an analysis for `company_name`, stamped with the current time.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn create_analysis(
    pool: &PgPool,
    company_name: &str,
    analysis: &CompanyAnalysis,
) -> Result<CreatedAnalysis, DbError> {
    let created = sqlx::query_as::<_, CreatedAnalysis>(
        "INSERT INTO saved_analyses (company_name, analysis_data, created_at) \
         VALUES ($1, $2, NOW()) \
         RETURNING id, company_name, created_at AS timestamp",
    )
    .bind(company_name)
    .bind(Json(analysis))
    .fetch_one(pool)
    .await?;

    tracing::debug!(id = created.id, company = company_name, "saved analysis");
    Ok(created)
}

/// All saved analyses, newest first.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn list_analyses(pool: &PgPool) -> Result<Vec<AnalysisSummary>, DbError> {
    Ok(sqlx::query_as::<_, AnalysisSummary>(
        "SELECT id, company_name, created_at AS timestamp, is_favorite, \
                LEFT(analysis_data::text, $1) AS preview \
         FROM saved_analyses \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(PREVIEW_CHARS)
    .fetch_all(pool)
    .await?)
}

/// Fetch one saved analysis by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has this id,
/// [`DbError::CorruptPayload`] if the stored JSON is not a valid analysis, or
/// [`DbError::Sqlx`] on query failure.
pub async fn get_analysis(pool: &PgPool, id: i64) -> Result<PersistedAnalysisRecord, DbError> {
    let row = sqlx::query_as::<_, SavedAnalysisRow>(
        "SELECT id, company_name, analysis_data, created_at, is_favorite \
         FROM saved_analyses WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    PersistedAnalysisRecord::try_from(row)
}

/// Mark or unmark a saved analysis as a favorite.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has this id.
pub async fn set_favorite(pool: &PgPool, id: i64, is_favorite: bool) -> Result<(), DbError> {
    let result = sqlx::query("UPDATE saved_analyses SET is_favorite = $2 WHERE id = $1")
        .bind(id)
        .bind(is_favorite)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has this id.
pub async fn delete_analysis(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM saved_analyses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Fetch several saved analyses, in the order their ids were requested.
///
/// Unknown ids are ignored, duplicate ids yield one record, and rows with a
/// corrupt payload are dropped (see [`decode_records`]).
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn get_analyses_by_ids(
    pool: &PgPool,
    ids: &[i64],
) -> Result<Vec<PersistedAnalysisRecord>, DbError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, SavedAnalysisRow>(
        "SELECT id, company_name, analysis_data, created_at, is_favorite \
         FROM saved_analyses \
         WHERE id = ANY($1) \
         ORDER BY array_position($1, id)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(decode_records(rows))
}
