//! SDR score card: a quick 1–5 rating of how good a prospect is for outreach.

use serde::Serialize;

use crate::companies::{CompanyProfile, CompanyType};

/// Pain-point keywords that line up with call automation.
const ALIGNMENT_KEYWORDS: &[&str] = &[
    "communication",
    "dispatch",
    "coordination",
    "driver",
    "compliance",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreItem {
    pub score: u8,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub fit: ScoreItem,
    pub alignment: ScoreItem,
    pub timeline: ScoreItem,
    /// Mean of the three scores, rounded to one decimal place.
    pub overall: f64,
}

/// Score a catalogued prospect against the pain points from its analysis.
///
/// `pain_points` is `None` when no analysis is available; alignment then
/// falls back to a neutral 3.
#[must_use]
pub fn score_prospect(company: &CompanyProfile, pain_points: Option<&[String]>) -> ScoreCard {
    let fit = ScoreItem {
        score: fit_score(company.fleet_size),
        reason: format!(
            "{}, {} trucks",
            company.company_type,
            group_thousands(company.fleet_size)
        ),
    };

    let alignment = ScoreItem {
        score: pain_points.map_or(3, alignment_score),
        reason: format!(
            "{} pain points identified",
            pain_points.map_or(0, <[String]>::len)
        ),
    };

    let timeline = ScoreItem {
        score: timeline_score(company.company_type),
        reason: if company.company_type == CompanyType::DigitalPlatform {
            "Tech-forward company".to_string()
        } else {
            "Traditional carrier".to_string()
        },
    };

    let sum = f64::from(fit.score) + f64::from(alignment.score) + f64::from(timeline.score);
    let overall = (sum / 3.0 * 10.0).round() / 10.0;

    ScoreCard {
        fit,
        alignment,
        timeline,
        overall,
    }
}

fn fit_score(fleet_size: u32) -> u8 {
    match fleet_size {
        10_000.. => 5,
        5_000..=9_999 => 4,
        500..=1_999 => 2,
        _ => 3,
    }
}

fn alignment_score(pain_points: &[String]) -> u8 {
    let matches = pain_points
        .iter()
        .filter(|p| {
            let lower = p.to_lowercase();
            ALIGNMENT_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .count();
    u8::try_from(matches.min(3)).unwrap_or(3) + 2
}

fn timeline_score(company_type: CompanyType) -> u8 {
    match company_type {
        CompanyType::DigitalPlatform => 5,
        CompanyType::RegionalCarrier => 4,
        CompanyType::SpecialtyCarrier => 2,
        CompanyType::OwnerOperator | CompanyType::LargeCarrier => 3,
    }
}

fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
