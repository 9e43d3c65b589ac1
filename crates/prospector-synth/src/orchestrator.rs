//! Synthesis orchestration.
//!
//! Single analysis is fail-open: whatever goes wrong, the caller gets a fully
//! populated [`CompanyAnalysis`]. Batch email generation is fail-closed:
//! invalid input and model failures surface as typed [`SynthError`]s.

use std::sync::Arc;

use async_trait::async_trait;
use prospector_core::{
    AggregatedData, AppConfig, BatchEmailResult, BatchEntity, CompanyAnalysis, CompanyCatalog,
    DEGRADED_OUTREACH_ANGLE, DEGRADED_PAIN_POINT, DEGRADED_PROFILE, DEGRADED_TECH_STACK,
};
use prospector_sources::{SourceAggregator, SourcesConfig};

use crate::batch::parse_batch_response;
use crate::error::SynthError;
use crate::model::{AnthropicClient, OpenAiClient, TextModel};
use crate::parse::parse_analysis;
use crate::prompt::{build_batch_prompt, build_single_prompt};

pub const DEFAULT_ANALYSIS_MAX_TOKENS: u32 = 500;
pub const DEFAULT_EMAIL_MAX_TOKENS: u32 = 2000;

/// Anything that can gather signals for a company. Must not fail.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    async fn collect(&self, company_name: &str) -> AggregatedData;
}

#[async_trait]
impl SignalProvider for SourceAggregator {
    async fn collect(&self, company_name: &str) -> AggregatedData {
        self.aggregate(company_name).await
    }
}

pub struct Synthesizer {
    signals: Arc<dyn SignalProvider>,
    analyst: Arc<dyn TextModel>,
    writer: Arc<dyn TextModel>,
    catalog: Option<Arc<CompanyCatalog>>,
    analysis_max_tokens: u32,
    email_max_tokens: u32,
}

impl Synthesizer {
    /// `analyst` produces single analyses; `writer` produces batch emails.
    #[must_use]
    pub fn new(
        signals: Arc<dyn SignalProvider>,
        analyst: Arc<dyn TextModel>,
        writer: Arc<dyn TextModel>,
    ) -> Self {
        Self {
            signals,
            analyst,
            writer,
            catalog: None,
            analysis_max_tokens: DEFAULT_ANALYSIS_MAX_TOKENS,
            email_max_tokens: DEFAULT_EMAIL_MAX_TOKENS,
        }
    }

    /// Wire the production sources and model backends from application config.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError`] if an HTTP client cannot be constructed.
    pub fn from_app_config(
        config: &AppConfig,
        catalog: Option<Arc<CompanyCatalog>>,
    ) -> Result<Self, SynthError> {
        let aggregator = SourceAggregator::new(SourcesConfig::from_app_config(config))?;
        let analyst = AnthropicClient::new(
            config.claude_api_key.clone(),
            &config.analysis_model,
            config.http_timeout_secs,
        )?;
        let writer = OpenAiClient::new(
            config.openai_api_key.clone(),
            &config.email_model,
            config.http_timeout_secs,
        )?;

        let mut synth = Self::new(Arc::new(aggregator), Arc::new(analyst), Arc::new(writer))
            .with_token_limits(config.analysis_max_tokens, config.email_max_tokens);
        if let Some(catalog) = catalog {
            synth = synth.with_catalog(catalog);
        }
        Ok(synth)
    }

    /// Use catalog entries as prompt hints for known companies.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<CompanyCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn with_token_limits(mut self, analysis_max_tokens: u32, email_max_tokens: u32) -> Self {
        self.analysis_max_tokens = analysis_max_tokens;
        self.email_max_tokens = email_max_tokens;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> Option<&CompanyCatalog> {
        self.catalog.as_deref()
    }

    /// Produce an analysis for `company_name`.
    ///
    /// Never fails. Model or parse failures are logged and replaced with
    /// [`CompanyAnalysis::degraded`]; a parsed reply with missing required
    /// fields has just those fields backfilled from the degraded values.
    pub async fn synthesize_single(&self, company_name: &str) -> CompanyAnalysis {
        match self.try_synthesize(company_name).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(
                    company = company_name,
                    error = %e,
                    "synthesis failed, returning degraded analysis"
                );
                CompanyAnalysis::degraded()
            }
        }
    }

    async fn try_synthesize(&self, company_name: &str) -> Result<CompanyAnalysis, SynthError> {
        let data = self.signals.collect(company_name).await;
        let hint = self
            .catalog
            .as_deref()
            .and_then(|c| c.find_by_name(company_name));

        let prompt = build_single_prompt(&data, hint);
        let raw = self
            .analyst
            .invoke(&prompt, self.analysis_max_tokens)
            .await?;
        let parsed = parse_analysis(&raw)?;

        tracing::info!(
            company = company_name,
            signals = data.signal_count(),
            catalogued = hint.is_some(),
            "synthesized company analysis"
        );
        Ok(backfill_required(parsed))
    }

    /// Generate one outreach email per entity with a single model call.
    ///
    /// # Errors
    ///
    /// - [`SynthError::EmptyBatch`] for an empty slice.
    /// - [`SynthError::Validation`] if any entity has a blank name or no
    ///   analysis; no model call is made.
    /// - [`SynthError::Model`] for backend failures, by cause.
    /// - [`SynthError::Parse`] if no email could be attributed.
    pub async fn generate_batch_emails(
        &self,
        entities: &[BatchEntity],
    ) -> Result<Vec<BatchEmailResult>, SynthError> {
        if entities.is_empty() {
            return Err(SynthError::EmptyBatch);
        }

        let invalid = entities.iter().filter(|e| !e.is_valid()).count();
        if invalid > 0 {
            return Err(SynthError::Validation {
                invalid,
                total: entities.len(),
            });
        }

        let prompt = build_batch_prompt(entities);
        let raw = self.writer.invoke(&prompt, self.email_max_tokens).await?;

        let names: Vec<&str> = entities.iter().map(|e| e.company_name.as_str()).collect();
        let emails = parse_batch_response(&raw, &names)?;

        if emails.len() < entities.len() {
            tracing::warn!(
                requested = entities.len(),
                parsed = emails.len(),
                "model reply covered fewer companies than requested"
            );
        }
        Ok(emails)
    }
}

/// Fill any empty required field from the degraded analysis.
#[must_use]
pub fn backfill_required(mut analysis: CompanyAnalysis) -> CompanyAnalysis {
    if analysis.profile.is_empty() {
        analysis.profile = DEGRADED_PROFILE.to_string();
    }
    if analysis.pain_points.is_empty() {
        analysis.pain_points = vec![DEGRADED_PAIN_POINT.to_string()];
    }
    if analysis.tech_stack.is_empty() {
        analysis.tech_stack = DEGRADED_TECH_STACK.to_string();
    }
    if analysis.outreach_angle.is_empty() {
        analysis.outreach_angle = DEGRADED_OUTREACH_ANGLE.to_string();
    }
    analysis
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
