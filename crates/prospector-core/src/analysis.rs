use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel values of the degraded analysis returned when synthesis fails.
pub const DEGRADED_PROFILE: &str = "Unable to generate profile at this time.";
pub const DEGRADED_PAIN_POINT: &str = "Unable to analyze at this time";
pub const DEGRADED_TECH_STACK: &str = "Data unavailable";
pub const DEGRADED_OUTREACH_ANGLE: &str = "Please try again shortly.";

/// What the model is told to write when a company's technology is not visible.
pub const UNKNOWN_TECH_STACK: &str = "Limited public tech visibility";

/// One normalized news article or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSignal {
    pub title: String,
    pub snippet: String,
    pub source_url: Option<String>,
}

/// Everything the aggregator collected for one company, in source relevance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedData {
    pub company_name: String,
    pub news: Vec<AggregatedSignal>,
    pub search_results: Vec<AggregatedSignal>,
    pub collected_at: DateTime<Utc>,
}

impl AggregatedData {
    /// An aggregation with no signals from any source.
    #[must_use]
    pub fn empty(company_name: &str) -> Self {
        Self {
            company_name: company_name.to_string(),
            news: Vec::new(),
            search_results: Vec::new(),
            collected_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.news.len() + self.search_results.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionMaker {
    pub title: String,
    #[serde(default)]
    pub concerns: Vec<String>,
}

impl DecisionMaker {
    fn new(title: &str, concerns: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            concerns: concerns.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    /// The two generic buyer personas used when the model names none.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "Operations Manager",
                &[
                    "Driver communication and coordination",
                    "Operational efficiency",
                ],
            ),
            Self::new(
                "Fleet Manager",
                &[
                    "Compliance and safety tracking",
                    "Dispatch and routing efficiency",
                ],
            ),
        ]
    }
}

/// Structured sales-intelligence report for one prospect company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAnalysis {
    pub profile: String,
    pub pain_points: Vec<String>,
    pub tech_stack: String,
    pub outreach_angle: String,
    #[serde(default = "DecisionMaker::defaults")]
    pub decision_makers: Vec<DecisionMaker>,
}

impl CompanyAnalysis {
    /// The fixed, fully-typed result returned when synthesis cannot produce one.
    #[must_use]
    pub fn degraded() -> Self {
        Self {
            profile: DEGRADED_PROFILE.to_string(),
            pain_points: vec![DEGRADED_PAIN_POINT.to_string()],
            tech_stack: DEGRADED_TECH_STACK.to_string(),
            outreach_angle: DEGRADED_OUTREACH_ANGLE.to_string(),
            decision_makers: DecisionMaker::defaults(),
        }
    }

    /// Whether this is exactly the degraded fallback.
    ///
    /// A partial reply backfilled field by field is not degraded, even when
    /// its profile carries the fallback text.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        *self == Self::degraded()
    }
}

/// A company queued for batch email generation.
///
/// `analysis` is optional so that callers can hand over whatever they loaded;
/// incomplete entities are rejected before any model call is made.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntity {
    pub company_name: String,
    pub analysis: Option<CompanyAnalysis>,
}

impl BatchEntity {
    #[must_use]
    pub fn new(company_name: impl Into<String>, analysis: CompanyAnalysis) -> Self {
        Self {
            company_name: company_name.into(),
            analysis: Some(analysis),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.company_name.trim().is_empty() && self.analysis.is_some()
    }
}

/// One generated outreach email, attributed to a canonical input company name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEmailResult {
    pub company_name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_analysis_is_fully_populated() {
        let analysis = CompanyAnalysis::degraded();
        assert_eq!(analysis.profile, DEGRADED_PROFILE);
        assert_eq!(analysis.pain_points, vec![DEGRADED_PAIN_POINT.to_string()]);
        assert_eq!(analysis.decision_makers.len(), 2);
        assert!(analysis.is_degraded());
    }

    #[test]
    fn fallback_profile_alone_is_not_degraded() {
        let analysis = CompanyAnalysis {
            pain_points: vec!["Dispatch coordination".to_string()],
            ..CompanyAnalysis::degraded()
        };
        assert_eq!(analysis.profile, DEGRADED_PROFILE);
        assert!(!analysis.is_degraded());
    }

    #[test]
    fn analysis_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(CompanyAnalysis::degraded()).expect("serialize");
        assert!(json.get("painPoints").is_some());
        assert!(json.get("techStack").is_some());
        assert!(json.get("outreachAngle").is_some());
        assert!(json.get("decisionMakers").is_some());
    }

    #[test]
    fn stored_payload_without_decision_makers_gets_defaults() {
        let json = serde_json::json!({
            "profile": "Regional carrier.",
            "painPoints": ["Dispatch load"],
            "techStack": "TMS",
            "outreachAngle": "Automate check calls."
        });
        let analysis: CompanyAnalysis = serde_json::from_value(json).expect("deserialize");
        assert_eq!(analysis.decision_makers, DecisionMaker::defaults());
    }

    #[test]
    fn batch_entity_requires_name_and_analysis() {
        assert!(BatchEntity::new("Acme", CompanyAnalysis::degraded()).is_valid());
        assert!(!BatchEntity::new("  ", CompanyAnalysis::degraded()).is_valid());
        let missing = BatchEntity {
            company_name: "Acme".to_string(),
            analysis: None,
        };
        assert!(!missing.is_valid());
    }
}
