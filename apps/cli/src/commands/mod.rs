//! Subcommand handlers.

pub mod config;
pub mod lessons;
pub mod reviews;
pub mod summary;

use drill_core::{DrillError, SessionStats};

use crate::sink::SubmitReport;

/// Print the end-of-session report. An interrupted session is not an error.
fn finish(
    stats: &SessionStats,
    outcome: drill_core::Result<()>,
    report: SubmitReport,
) -> anyhow::Result<()> {
    match outcome {
        Ok(()) => {}
        Err(DrillError::Interrupted) => println!("\nSession interrupted."),
        Err(error) => return Err(error.into()),
    }

    println!("\n{}", session_report(stats));
    if report.failed > 0 {
        println!("{} result(s) could not be submitted.", report.failed);
    }
    tracing::info!(submitted = report.submitted, failed = report.failed, "session over");
    Ok(())
}

fn session_report(stats: &SessionStats) -> String {
    let rate = stats
        .correct_rate()
        .map_or_else(|| "-".to_string(), |rate| format!("{rate}%"));
    format!(
        "Completed: {}/{}\nCorrect answers: {}\nWrong answers: {}\nCorrect rate: {rate}",
        stats.completed, stats.total, stats.correct, stats.incorrect
    )
}
