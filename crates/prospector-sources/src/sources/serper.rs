//! Serper (Google search API) collector.

use prospector_core::AggregatedSignal;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::MAX_RESULTS_PER_SOURCE;
use crate::error::SourceError;

#[derive(Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    link: Option<String>,
}

/// Fetches the top organic search results about the company's operations.
///
/// # Errors
///
/// Returns [`SourceError::Http`] on network failure,
/// [`SourceError::UnexpectedStatus`] on a non-2xx response, or
/// [`SourceError::Deserialize`] if the body is not the expected shape.
pub(crate) async fn fetch_serper_results(
    client: &Client,
    base_url: &str,
    api_key: &str,
    company_name: &str,
) -> Result<Vec<AggregatedSignal>, SourceError> {
    let url = format!("{}/search", base_url.trim_end_matches('/'));
    let query = format!("{company_name} trucking logistics operations");

    let response = client
        .post(&url)
        .header("X-API-KEY", api_key)
        .json(&SerperRequest { q: &query })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            source_name: "serper",
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let parsed: SerperResponse =
        serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
            context: format!("serper results for {company_name}"),
            source: e,
        })?;

    Ok(parsed
        .organic
        .into_iter()
        .take(MAX_RESULTS_PER_SOURCE)
        .map(|r| AggregatedSignal {
            title: r.title.trim().to_string(),
            snippet: r.snippet.trim().to_string(),
            source_url: r.link,
        })
        .collect())
}
