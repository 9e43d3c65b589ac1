use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank secrets are treated the same as unset ones.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("PROSPECTOR_ENV", "development"))?;

    let bind_addr = parse_addr("PROSPECTOR_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("PROSPECTOR_LOG_LEVEL", "info");
    let companies_path = PathBuf::from(or_default(
        "PROSPECTOR_COMPANIES_PATH",
        "./config/companies.yaml",
    ));

    let claude_api_key = optional("CLAUDE_API_KEY");
    let openai_api_key = optional("OPENAI_API_KEY");
    let newsapi_key = optional("NEWSAPI_KEY");
    let serper_api_key = optional("SERPER_API_KEY");

    let analysis_model = or_default("PROSPECTOR_ANALYSIS_MODEL", "claude-3-5-sonnet-20241022");
    let email_model = or_default("PROSPECTOR_EMAIL_MODEL", "gpt-4-turbo");
    let analysis_max_tokens = parse_u32("PROSPECTOR_ANALYSIS_MAX_TOKENS", "500")?;
    let email_max_tokens = parse_u32("PROSPECTOR_EMAIL_MAX_TOKENS", "2000")?;

    let http_timeout_secs = parse_u64("PROSPECTOR_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "PROSPECTOR_USER_AGENT",
        "prospector/0.1 (sales-intelligence)",
    );

    let db_max_connections = parse_u32("PROSPECTOR_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("PROSPECTOR_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("PROSPECTOR_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        companies_path,
        claude_api_key,
        openai_api_key,
        newsapi_key,
        serper_api_key,
        analysis_model,
        email_model,
        analysis_max_tokens,
        email_max_tokens,
        http_timeout_secs,
        user_agent,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PROSPECTOR_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
