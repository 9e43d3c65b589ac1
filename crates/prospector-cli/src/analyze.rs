//! `analyze` and `companies` command handlers.

use prospector_core::{
    estimate_roi, score_prospect, CompanyAnalysis, CompanyCatalog, RoiEstimate, RoiInputs,
    ScoreCard,
};
use prospector_synth::Synthesizer;

/// Run a fresh analysis, print it, and optionally save it.
///
/// Synthesis itself never fails; only saving can return an error.
pub(crate) async fn run_analyze(
    synth: &Synthesizer,
    catalog: &CompanyCatalog,
    pool: Option<&sqlx::PgPool>,
    company: &str,
    json: bool,
) -> anyhow::Result<()> {
    let company = company.trim();
    anyhow::ensure!(!company.is_empty(), "company name must not be empty");

    let analysis = synth.synthesize_single(company).await;
    if analysis.is_degraded() {
        tracing::warn!(company, "analysis is degraded; check API keys and logs");
    }

    let profile = catalog.find_by_name(company);
    let score_card = profile.map(|p| {
        let pain_points = (!analysis.is_degraded()).then_some(analysis.pain_points.as_slice());
        score_prospect(p, pain_points)
    });
    let roi = profile.map(|p| estimate_roi(&RoiInputs::for_fleet(p.fleet_size)));

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", format_report(company, &analysis, score_card.as_ref()));
        if let Some(roi) = &roi {
            print!("{}", format_roi(roi));
        }
    }

    if let Some(pool) = pool {
        let created = prospector_db::create_analysis(pool, company, &analysis).await?;
        println!("saved analysis {} for {}", created.id, created.company_name);
    }

    Ok(())
}

pub(crate) fn run_companies(catalog: &CompanyCatalog) {
    println!(
        "{:<4}{:<28}{:<20}{:>8}  SCORE",
        "ID", "NAME", "TYPE", "FLEET"
    );
    for company in &catalog.companies {
        let card = score_prospect(company, None);
        println!(
            "{:<4}{:<28}{:<20}{:>8}  {:.1}",
            company.id,
            company.name,
            company.company_type.to_string(),
            company.fleet_size,
            card.overall
        );
    }
}

pub(crate) fn format_report(
    company: &str,
    analysis: &CompanyAnalysis,
    score_card: Option<&ScoreCard>,
) -> String {
    let mut lines = vec![
        format!("== {company} =="),
        String::new(),
        "Profile:".to_string(),
        format!("  {}", analysis.profile),
        String::new(),
        "Pain points:".to_string(),
    ];
    lines.extend(analysis.pain_points.iter().map(|p| format!("  - {p}")));
    lines.extend([
        String::new(),
        "Tech stack:".to_string(),
        format!("  {}", analysis.tech_stack),
        String::new(),
        "Outreach angle:".to_string(),
        format!("  {}", analysis.outreach_angle),
    ]);

    if !analysis.decision_makers.is_empty() {
        lines.push(String::new());
        lines.push("Decision makers:".to_string());
        lines.extend(
            analysis
                .decision_makers
                .iter()
                .map(|dm| format!("  - {} ({})", dm.title, dm.concerns.join("; "))),
        );
    }

    if let Some(card) = score_card {
        lines.extend([
            String::new(),
            format!("Score card (overall {:.1}):", card.overall),
            format!("  fit        {}  {}", card.fit.score, card.fit.reason),
            format!(
                "  alignment  {}  {}",
                card.alignment.score, card.alignment.reason
            ),
            format!(
                "  timeline   {}  {}",
                card.timeline.score, card.timeline.reason
            ),
        ]);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub(crate) fn format_roi(roi: &RoiEstimate) -> String {
    let net = match roi.roi_percentage {
        Some(pct) => format!("${} ({pct}% return)", roi.net_roi),
        None => format!("${}", roi.net_roi),
    };
    format!(
        "\nEstimated annual ROI ({} trucks):\n  hours saved        {}\n  \
         total savings      ${}\n  implementation     ${}\n  net ROI            {net}\n",
        roi.inputs.fleet_size, roi.hours_saved, roi.total_savings, roi.implementation_cost
    )
}
