use super::*;
use crate::analyze::{format_report, format_roi};
use crate::saved::format_summary_line;
use prospector_core::{
    estimate_roi, score_prospect, CompanyAnalysis, CompanyProfile, CompanyType, RoiInputs,
    DEGRADED_PROFILE,
};

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["prospector-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_analyze_with_save() {
    let cli = Cli::try_parse_from(["prospector-cli", "analyze", "Werner Enterprises", "--save"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            ref company,
            save: true,
            json: false,
        }) if company == "Werner Enterprises"
    ));
}

#[test]
fn analyze_requires_company() {
    assert!(Cli::try_parse_from(["prospector-cli", "analyze"]).is_err());
}

#[test]
fn parses_saved_favorite_off() {
    let cli = Cli::try_parse_from(["prospector-cli", "saved", "favorite", "7", "--off"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Saved {
            command: SavedCommands::Favorite { id: 7, off: true }
        })
    ));
}

#[test]
fn parses_saved_list_defaults() {
    let cli = Cli::try_parse_from(["prospector-cli", "saved", "list"]).expect("valid");
    assert!(matches!(
        cli.command,
        Some(Commands::Saved {
            command: SavedCommands::List { favorites: false }
        })
    ));
}

#[test]
fn parses_emails_ids() {
    let cli = Cli::try_parse_from(["prospector-cli", "emails", "3", "1", "2"]).expect("valid");
    assert!(matches!(
        cli.command,
        Some(Commands::Emails { ref ids }) if ids == &[3, 1, 2]
    ));
}

#[test]
fn emails_require_at_least_one_id() {
    assert!(Cli::try_parse_from(["prospector-cli", "emails"]).is_err());
    assert!(Cli::try_parse_from(["prospector-cli", "emails", "abc"]).is_err());
}

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["prospector-cli", "db", "migrate"]).expect("valid");
    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn report_includes_score_card_for_catalogued_company() {
    let company = CompanyProfile {
        id: 4,
        name: "Landstar System".to_string(),
        fleet_size: 11_000,
        company_type: CompanyType::OwnerOperator,
        headquarters: None,
        notes: None,
    };
    let analysis = CompanyAnalysis::degraded();
    let card = score_prospect(&company, None);

    let report = format_report("Landstar System", &analysis, Some(&card));
    assert!(report.starts_with("== Landstar System =="));
    assert!(report.contains(DEGRADED_PROFILE));
    assert!(report.contains("  - Operations Manager ("));
    assert!(report.contains("Score card (overall 3.7):"));
    assert!(report.contains("  fit        5  owner operator, 11,000 trucks"));
}

#[test]
fn report_without_score_card_omits_section() {
    let report = format_report("Acme", &CompanyAnalysis::degraded(), None);
    assert!(!report.contains("Score card"));
}

#[test]
fn summary_line_marks_favorites_and_flattens_preview() {
    let row = prospector_db::AnalysisSummary {
        id: 12,
        company_name: "Werner Enterprises".to_string(),
        timestamp: "2025-03-01T10:30:00Z".parse().expect("timestamp"),
        is_favorite: true,
        preview: "{\"profile\":\n\"Omaha carrier\"}".to_string(),
    };
    let line = format_summary_line(&row);
    assert!(line.starts_with("12    *  Werner Enterprises"));
    assert!(line.contains("2025-03-01 10:30"));
    assert!(line.ends_with("{\"profile\": \"Omaha carrier\"}"));
}

#[test]
fn roi_section_shows_net_and_percentage() {
    let text = format_roi(&estimate_roi(&RoiInputs::for_fleet(5_000)));
    assert!(text.contains("Estimated annual ROI (5000 trucks):"));
    assert!(text.contains("  total savings      $24220000\n"));
    assert!(text.contains("  net ROI            $23970000 (9588% return)\n"));
}
