use prospector_core::AppConfig;

pub const DEFAULT_NEWSAPI_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev";
pub const DEFAULT_GOOGLE_NEWS_BASE_URL: &str = "https://news.google.com";

/// Configuration for the source aggregator.
///
/// Base URLs are overridable so tests can point each source at a mock server.
#[derive(Clone)]
pub struct SourcesConfig {
    pub newsapi_key: Option<String>,
    pub serper_api_key: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub newsapi_base_url: String,
    pub serper_base_url: String,
    pub google_news_base_url: String,
}

impl SourcesConfig {
    #[must_use]
    pub fn new(newsapi_key: Option<String>, serper_api_key: Option<String>) -> Self {
        Self {
            newsapi_key,
            serper_api_key,
            timeout_secs: 30,
            user_agent: "prospector/0.1 (sales-intelligence)".to_string(),
            newsapi_base_url: DEFAULT_NEWSAPI_BASE_URL.to_string(),
            serper_base_url: DEFAULT_SERPER_BASE_URL.to_string(),
            google_news_base_url: DEFAULT_GOOGLE_NEWS_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.http_timeout_secs,
            user_agent: config.user_agent.clone(),
            ..Self::new(config.newsapi_key.clone(), config.serper_api_key.clone())
        }
    }
}

impl std::fmt::Debug for SourcesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcesConfig")
            .field("newsapi_key", &self.newsapi_key.as_ref().map(|_| "[redacted]"))
            .field(
                "serper_api_key",
                &self.serper_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("newsapi_base_url", &self.newsapi_base_url)
            .field("serper_base_url", &self.serper_base_url)
            .field("google_news_base_url", &self.google_news_base_url)
            .finish()
    }
}
