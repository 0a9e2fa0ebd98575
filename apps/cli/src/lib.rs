//! Terminal flashcard trainer for the WaniKani study API.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod sink;
pub mod terminal;

use clap::{Args, Parser, Subcommand};
use drill_core::{EffectiveSettings, SettingsOverrides};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::ApiClient;

#[derive(Parser)]
#[command(name = "kanji-drill", version, about = "Review kanji, radicals and vocabulary")]
pub struct Cli {
    /// API token (defaults to $WANIKANI_API_KEY)
    #[arg(short = 'k', long, global = true, env = config::API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Review the items that are due
    Reviews {
        #[command(flatten)]
        session: SessionArgs,
        /// Do not submit results
        #[arg(long)]
        dry_run: bool,
    },
    /// Learn new items, three at a time
    Lessons {
        #[command(flatten)]
        session: SessionArgs,
        /// Do not start assignments
        #[arg(long)]
        dry_run: bool,
    },
    /// Show available lessons and reviews
    Summary,
    /// Show the effective settings
    Config {
        #[command(flatten)]
        session: SessionArgs,
        /// Store the effective settings as the new defaults
        #[arg(long)]
        save: bool,
    },
}

/// Per-run overrides of the stored settings.
#[derive(Args, Debug, Default)]
struct SessionArgs {
    /// Require every reading, comma separated
    #[arg(long)]
    hard: bool,
    /// Maximum number of items
    #[arg(long)]
    limit: Option<usize>,
    /// Number of items asked in rotation
    #[arg(long)]
    window: Option<usize>,
    /// Offer to override wrong answers
    #[arg(long)]
    double_check: bool,
    /// Show mnemonics after a wrong answer
    #[arg(long)]
    mnemonics: bool,
    /// Similarity needed for a close match (0 to 1)
    #[arg(long)]
    close_match_ratio: Option<f64>,
}

impl SessionArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            hard_mode: self.hard.then_some(true),
            double_check: self.double_check.then_some(true),
            display_mnemonics: self.mnemonics.then_some(true),
            limit: self.limit,
            window_size: self.window,
            close_match_ratio: self.close_match_ratio,
        }
    }
}

fn effective_settings(overrides: &SettingsOverrides) -> anyhow::Result<EffectiveSettings> {
    let stored = config::load_settings(&config::settings_path()?)?;
    let settings = EffectiveSettings::merge(&stored, overrides);
    settings.validate()?;
    Ok(settings)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Reviews { session, dry_run } => {
            let settings = effective_settings(&session.overrides())?;
            let client = ApiClient::new(config::resolve_api_key(cli.api_key)?);
            commands::reviews::run(client, settings, dry_run).await
        }
        Command::Lessons { session, dry_run } => {
            let settings = effective_settings(&session.overrides())?;
            let client = ApiClient::new(config::resolve_api_key(cli.api_key)?);
            commands::lessons::run(client, settings, dry_run).await
        }
        Command::Summary => {
            let client = ApiClient::new(config::resolve_api_key(cli.api_key)?);
            commands::summary::run(&client).await
        }
        Command::Config { session, save } => {
            let settings = effective_settings(&session.overrides())?;
            commands::config::run(&config::settings_path()?, &settings, save)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_review_flags() {
        let cli = Cli::try_parse_from([
            "kanji-drill",
            "reviews",
            "--hard",
            "--limit",
            "20",
            "--dry-run",
            "-k",
            "secret",
        ])
        .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("secret"));

        let Command::Reviews { session, dry_run } = cli.command else {
            panic!("expected reviews");
        };
        assert!(dry_run);
        let overrides = session.overrides();
        assert_eq!(overrides.hard_mode, Some(true));
        assert_eq!(overrides.limit, Some(20));
        assert_eq!(overrides.double_check, None);
    }

    #[test]
    fn test_unset_flags_do_not_override() {
        assert_eq!(SessionArgs::default().overrides(), SettingsOverrides::default());
    }
}
