use chrono::{DateTime, Local};

use crate::api::ApiClient;

const BAR_WIDTH: usize = 30;

pub async fn run(client: &ApiClient) -> anyhow::Result<()> {
    let summary = client.summary().await?;
    let reviews = summary.review_ids().len();
    println!("Lessons available: {}", summary.lesson_ids().len());
    println!("Reviews available: {reviews}");

    let upcoming = summary.upcoming_today(Local::now().date_naive());
    if !upcoming.is_empty() {
        println!("\n{}", render_forecast(&upcoming, reviews));
    }
    Ok(())
}

/// Hourly histogram of today's upcoming reviews with a running total.
pub fn render_forecast(upcoming: &[(DateTime<Local>, usize)], available_now: usize) -> String {
    let max = upcoming.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);
    let mut total = available_now;
    let mut lines = vec!["Today | Upcoming reviews".to_string()];

    for (at, count) in upcoming {
        total += count;
        let bar = (count * BAR_WIDTH).div_ceil(max);
        lines.push(format!(
            "{} | {} +{count} | {total}",
            at.format("%I %p"),
            "⣿".repeat(bar)
        ));
    }
    lines.join("\n")
}
