use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub companies_path: PathBuf,
    pub claude_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub newsapi_key: Option<String>,
    pub serper_api_key: Option<String>,
    pub analysis_model: String,
    pub email_model: String,
    pub analysis_max_tokens: u32,
    pub email_max_tokens: u32,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

fn redact(value: Option<&String>) -> Option<&'static str> {
    value.map(|_| "[redacted]")
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("companies_path", &self.companies_path)
            .field("database_url", &"[redacted]")
            .field("claude_api_key", &redact(self.claude_api_key.as_ref()))
            .field("openai_api_key", &redact(self.openai_api_key.as_ref()))
            .field("newsapi_key", &redact(self.newsapi_key.as_ref()))
            .field("serper_api_key", &redact(self.serper_api_key.as_ref()))
            .field("analysis_model", &self.analysis_model)
            .field("email_model", &self.email_model)
            .field("analysis_max_tokens", &self.analysis_max_tokens)
            .field("email_max_tokens", &self.email_max_tokens)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
