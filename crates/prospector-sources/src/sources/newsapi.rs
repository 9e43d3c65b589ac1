//! NewsAPI `/v2/everything` collector.

use prospector_core::AggregatedSignal;
use reqwest::Client;
use serde::Deserialize;

use super::MAX_RESULTS_PER_SOURCE;
use crate::error::SourceError;

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

/// Builds the NewsAPI query restricting matches to logistics coverage.
pub(crate) fn news_query(company_name: &str) -> String {
    format!(
        "\"{company_name}\" AND (trucking OR logistics OR freight OR dispatch OR drivers)"
    )
}

/// Fetches the most recent logistics-related articles mentioning the company.
///
/// # Errors
///
/// Returns [`SourceError::Http`] on network failure,
/// [`SourceError::UnexpectedStatus`] on a non-2xx response, or
/// [`SourceError::Deserialize`] if the body is not the expected shape.
pub(crate) async fn fetch_newsapi_articles(
    client: &Client,
    base_url: &str,
    api_key: &str,
    company_name: &str,
) -> Result<Vec<AggregatedSignal>, SourceError> {
    let url = format!("{}/v2/everything", base_url.trim_end_matches('/'));
    let page_size = MAX_RESULTS_PER_SOURCE.to_string();
    let query = news_query(company_name);

    let response = client
        .get(&url)
        .query(&[
            ("q", query.as_str()),
            ("sortBy", "publishedAt"),
            ("language", "en"),
            ("pageSize", page_size.as_str()),
            ("apiKey", api_key),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            source_name: "newsapi",
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let parsed: NewsApiResponse =
        serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
            context: format!("newsapi articles for {company_name}"),
            source: e,
        })?;

    Ok(normalize_articles(parsed.articles))
}

fn normalize_articles(articles: Vec<NewsApiArticle>) -> Vec<AggregatedSignal> {
    articles
        .into_iter()
        .filter_map(|article| {
            let title = article.title?.trim().to_string();
            if title.is_empty() {
                return None;
            }
            Some(AggregatedSignal {
                title,
                snippet: article.description.unwrap_or_default().trim().to_string(),
                source_url: article.url,
            })
        })
        .take(MAX_RESULTS_PER_SOURCE)
        .collect()
}
