//! Source aggregation for a single company.

use std::time::Duration;

use chrono::Utc;
use prospector_core::{AggregatedData, AggregatedSignal};
use reqwest::Client;

use crate::error::SourceError;
use crate::sources::{fetch_google_news_rss, fetch_newsapi_articles, fetch_serper_results};
use crate::types::SourcesConfig;

/// Collects news and search signals for prospect companies.
///
/// Holds one shared `reqwest::Client`; safe to share across requests.
pub struct SourceAggregator {
    client: Client,
    config: SourcesConfig,
}

impl SourceAggregator {
    /// Creates an aggregator with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: SourcesConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client, config })
    }

    /// Collect news and search results for `company_name`.
    ///
    /// Sources are queried one after another (news, then search) with a
    /// single attempt each. A source that fails is logged and contributes an
    /// empty list; the aggregation as a whole always succeeds.
    pub async fn aggregate(&self, company_name: &str) -> AggregatedData {
        let news = self.collect_news(company_name).await;
        let search_results = self.collect_search(company_name).await;

        tracing::info!(
            company = company_name,
            news = news.len(),
            search_results = search_results.len(),
            "aggregated company signals"
        );

        AggregatedData {
            company_name: company_name.to_string(),
            news,
            search_results,
            collected_at: Utc::now(),
        }
    }

    async fn collect_news(&self, company_name: &str) -> Vec<AggregatedSignal> {
        let (source, result) = match self.config.newsapi_key.as_deref() {
            Some(key) => (
                "newsapi",
                fetch_newsapi_articles(
                    &self.client,
                    &self.config.newsapi_base_url,
                    key,
                    company_name,
                )
                .await,
            ),
            None => (
                "google_news_rss",
                fetch_google_news_rss(&self.client, &self.config.google_news_base_url, company_name)
                    .await,
            ),
        };
        settle(source, company_name, result)
    }

    async fn collect_search(&self, company_name: &str) -> Vec<AggregatedSignal> {
        let Some(key) = self.config.serper_api_key.as_deref() else {
            tracing::info!(
                company = company_name,
                "SERPER_API_KEY not configured; skipping search results"
            );
            return Vec::new();
        };

        let result =
            fetch_serper_results(&self.client, &self.config.serper_base_url, key, company_name)
                .await;
        settle("serper", company_name, result)
    }
}

/// Turn a per-source result into its signals, swallowing failures.
fn settle(
    source: &'static str,
    company_name: &str,
    result: Result<Vec<AggregatedSignal>, SourceError>,
) -> Vec<AggregatedSignal> {
    match result {
        Ok(signals) => {
            tracing::debug!(
                company = company_name,
                source,
                count = signals.len(),
                "collected signals"
            );
            signals
        }
        Err(e) => {
            tracing::warn!(
                company = company_name,
                source,
                error = %e,
                "signal source failed"
            );
            Vec::new()
        }
    }
}
