//! Background submission of completed items.
//!
//! The session loop hands results to a channel and never waits on the
//! network; a tokio task drains the channel and talks to the API.

use drill_core::{ItemResult, ResultSink};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::api::ApiClient;

/// What to do with a completed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Post a review with the wrong answer counts.
    Review,
    /// Start the item's assignment.
    Lesson,
}

/// Outcome of a submitter task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReport {
    pub submitted: usize,
    pub failed: usize,
}

/// Result sink feeding the background submitter.
pub struct ChannelSink {
    tx: UnboundedSender<ItemResult>,
}

impl ResultSink for ChannelSink {
    fn submit(&mut self, result: &ItemResult) {
        if self.tx.send(*result).is_err() {
            tracing::error!(item_id = result.item_id, "submitter stopped, result dropped");
        }
    }
}

/// Create the sink and spawn its submitter. The task ends once the sink is
/// dropped and the channel is drained.
pub fn spawn_submitter(
    client: ApiClient,
    mode: SubmitMode,
    dry_run: bool,
) -> (ChannelSink, JoinHandle<SubmitReport>) {
    let (tx, rx) = unbounded_channel();
    let handle = tokio::spawn(drain(client, rx, mode, dry_run));
    (ChannelSink { tx }, handle)
}

async fn drain(
    client: ApiClient,
    mut rx: UnboundedReceiver<ItemResult>,
    mode: SubmitMode,
    dry_run: bool,
) -> SubmitReport {
    let mut report = SubmitReport::default();

    while let Some(result) = rx.recv().await {
        if dry_run {
            tracing::info!(item_id = result.item_id, ?mode, "dry run, not submitting");
            continue;
        }

        let outcome = match mode {
            SubmitMode::Review => client.submit_review(&result).await,
            SubmitMode::Lesson => match client.assignment_id(result.item_id).await {
                Ok(Some(assignment_id)) => client.start_assignment(assignment_id).await,
                Ok(None) => {
                    tracing::warn!(item_id = result.item_id, "no assignment for lesson");
                    continue;
                }
                Err(error) => Err(error),
            },
        };

        match outcome {
            Ok(()) => {
                report.submitted += 1;
                tracing::debug!(item_id = result.item_id, ?mode, "submitted");
            }
            Err(error) => {
                report.failed += 1;
                tracing::error!(item_id = result.item_id, %error, "submission failed");
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_dry_run_submits_nothing() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9", "key");
        let (mut sink, handle) = spawn_submitter(client, SubmitMode::Review, true);
        sink.submit(&ItemResult {
            item_id: 440,
            meaning_wrong: 1,
            reading_wrong: 0,
        });
        drop(sink);

        let report = handle.await.unwrap();
        assert_eq!(report, SubmitReport::default());
    }

    #[tokio::test]
    async fn test_unreachable_backend_counts_failures() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9", "key");
        let (mut sink, handle) = spawn_submitter(client, SubmitMode::Review, false);
        sink.submit(&ItemResult {
            item_id: 440,
            meaning_wrong: 0,
            reading_wrong: 0,
        });
        drop(sink);

        let report = handle.await.unwrap();
        assert_eq!(report.submitted, 0);
        assert_eq!(report.failed, 1);
    }
}
