use thiserror::Error;

/// Failures from a single generative-model call.
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP 401/403, or no credential configured for the backend.
    #[error("{backend} rejected credentials: {message}")]
    Auth {
        backend: &'static str,
        message: String,
    },

    /// HTTP 429. `retry_after_secs` is taken from `Retry-After` when present.
    #[error("{backend} rate limit exceeded")]
    RateLimited {
        backend: &'static str,
        retry_after_secs: Option<u64>,
    },

    /// Network failure, timeout, or any other non-2xx status.
    #[error("{backend} request failed: {message}")]
    Transport {
        backend: &'static str,
        message: String,
    },

    /// A 2xx response whose body lacks the expected text content.
    #[error("unexpected response structure from {backend}: {message}")]
    Envelope {
        backend: &'static str,
        message: String,
    },
}

/// Failures turning raw model text into typed records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in model response")]
    NoJsonObject,

    #[error("model response contained malformed JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("no emails could be attributed to the requested companies")]
    NoEmailsParsed,
}

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("no analyses provided for email generation")]
    EmptyBatch,

    #[error("{invalid} of {total} analyses missing a company name or analysis data")]
    Validation { invalid: usize, total: usize },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to build signal sources: {0}")]
    Sources(#[from] prospector_sources::SourceError),
}
