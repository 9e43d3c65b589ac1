//! `emails` command: batch outreach drafts for saved analyses.

use prospector_core::BatchEntity;
use prospector_synth::Synthesizer;

pub(crate) async fn run_emails(
    pool: &sqlx::PgPool,
    synth: &Synthesizer,
    ids: &[i64],
) -> anyhow::Result<()> {
    let records = prospector_db::get_analyses_by_ids(pool, ids).await?;
    if records.is_empty() {
        anyhow::bail!("no saved analyses found for ids {ids:?}");
    }

    for id in ids {
        if !records.iter().any(|r| r.id == *id) {
            tracing::warn!(id, "saved analysis missing or unreadable; skipping");
        }
    }

    let entities: Vec<BatchEntity> = records
        .into_iter()
        .map(|r| BatchEntity::new(r.company_name, r.analysis_data))
        .collect();

    let emails = synth.generate_batch_emails(&entities).await?;
    for email in &emails {
        println!("== {} ==\n\n{}\n", email.company_name, email.email);
    }
    println!("generated {} of {} emails", emails.len(), entities.len());
    Ok(())
}
