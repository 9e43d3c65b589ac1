//! Saved analysis command handlers for the CLI.

use clap::Subcommand;
use prospector_db::{AnalysisSummary, DbError};

use crate::analyze::format_report;

/// Sub-commands available under `saved`.
#[derive(Debug, Subcommand)]
pub enum SavedCommands {
    /// List saved analyses, newest first
    List {
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Print one saved analysis
    Show { id: i64 },
    /// Mark a saved analysis as a favorite
    Favorite {
        id: i64,
        /// Clear the favorite flag instead of setting it
        #[arg(long)]
        off: bool,
    },
    Delete { id: i64 },
}

pub(crate) async fn run_saved(pool: &sqlx::PgPool, command: SavedCommands) -> anyhow::Result<()> {
    match command {
        SavedCommands::List { favorites } => {
            let rows = prospector_db::list_analyses(pool).await?;
            let rows: Vec<AnalysisSummary> = rows
                .into_iter()
                .filter(|r| !favorites || r.is_favorite)
                .collect();
            if rows.is_empty() {
                println!("no saved analyses; run `analyze <company> --save` first");
                return Ok(());
            }
            println!("{:<6}{:<3}{:<28}{:<18}PREVIEW", "ID", "*", "COMPANY", "SAVED");
            for row in &rows {
                println!("{}", format_summary_line(row));
            }
        }
        SavedCommands::Show { id } => {
            let record = prospector_db::get_analysis(pool, id)
                .await
                .map_err(|e| not_found_context(e, id))?;
            print!(
                "{}",
                format_report(&record.company_name, &record.analysis_data, None)
            );
            println!("\nsaved {}", record.timestamp.format("%Y-%m-%d %H:%M UTC"));
        }
        SavedCommands::Favorite { id, off } => {
            prospector_db::set_favorite(pool, id, !off)
                .await
                .map_err(|e| not_found_context(e, id))?;
            if off {
                println!("analysis {id} unmarked as favorite");
            } else {
                println!("analysis {id} marked as favorite");
            }
        }
        SavedCommands::Delete { id } => {
            prospector_db::delete_analysis(pool, id)
                .await
                .map_err(|e| not_found_context(e, id))?;
            println!("deleted analysis {id}");
        }
    }
    Ok(())
}

fn not_found_context(err: DbError, id: i64) -> anyhow::Error {
    match err {
        DbError::NotFound => anyhow::anyhow!("no saved analysis with id {id}"),
        other => other.into(),
    }
}

pub(crate) fn format_summary_line(row: &AnalysisSummary) -> String {
    let preview: String = row.preview.chars().take(60).collect();
    format!(
        "{:<6}{:<3}{:<28}{:<18}{}",
        row.id,
        if row.is_favorite { "*" } else { "" },
        row.company_name,
        row.timestamp.format("%Y-%m-%d %H:%M"),
        preview.replace('\n', " ")
    )
}
