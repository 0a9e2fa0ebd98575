use drill_core::{EffectiveSettings, ReviewSession};

use crate::api::ApiClient;
use crate::sink::{spawn_submitter, SubmitMode};
use crate::terminal::TerminalReviewer;

pub async fn run(client: ApiClient, settings: EffectiveSettings, dry_run: bool) -> anyhow::Result<()> {
    let summary = client.summary().await?;
    let ids = summary.review_ids();
    if ids.is_empty() {
        println!("There are no reviews available.");
        return Ok(());
    }

    let items = client.subjects(ids).await?;
    tracing::info!(available = ids.len(), fetched = items.len(), "starting reviews");

    let (mut sink, submitter) = spawn_submitter(client, SubmitMode::Review, dry_run);
    let (stats, outcome) = tokio::task::spawn_blocking(move || {
        let mut reviewer = TerminalReviewer::new();
        let mut session = ReviewSession::new(items, settings, &mut reviewer, &mut sink);
        let outcome = session.run().map(drop);
        (session.stats().clone(), outcome)
    })
    .await?;

    let report = submitter.await?;
    super::finish(&stats, outcome, report)
}
