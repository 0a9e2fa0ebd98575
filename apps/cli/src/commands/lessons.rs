use std::collections::BTreeSet;

use drill_core::{run_lessons, EffectiveSettings, Item, ItemId};

use crate::api::ApiClient;
use crate::sink::{spawn_submitter, SubmitMode};
use crate::terminal::TerminalReviewer;

pub async fn run(client: ApiClient, settings: EffectiveSettings, dry_run: bool) -> anyhow::Result<()> {
    let summary = client.summary().await?;
    let ids = summary.lesson_ids();
    if ids.is_empty() {
        println!("There are no lessons available.");
        return Ok(());
    }

    let ids: Vec<ItemId> = ids.iter().copied().take(settings.limit).collect();
    let items = client.subjects(&ids).await?;
    let components = client.subjects(&component_ids(&items)).await?;
    tracing::info!(lessons = items.len(), components = components.len(), "starting lessons");

    let (mut sink, submitter) = spawn_submitter(client, SubmitMode::Lesson, dry_run);
    let (stats, outcome) = tokio::task::spawn_blocking(move || {
        let mut reviewer = TerminalReviewer::with_components(components);
        run_lessons(items, &settings, &mut reviewer, &mut sink)
    })
    .await?;

    let report = submitter.await?;
    super::finish(&stats, outcome, report)
}

/// Distinct components referenced by the lesson items.
fn component_ids(items: &[Item]) -> Vec<ItemId> {
    items
        .iter()
        .flat_map(|item| item.component_ids.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
