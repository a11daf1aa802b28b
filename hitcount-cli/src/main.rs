//! hitcount -- content page views from nginx access logs
//!
//! Provides subcommands for:
//! - Totals and the top content URLs of a day (`summary`)
//! - Per-URL breakdown of status codes, referrers and agents (`url`)
//! - Crawler traffic grouped by signature (`crawlers`)
//! - Content exclude rule validation (`rules`)
//! - Configuration inspection (`config`)

mod cli;
mod commands;
mod discover;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use hitcount_core::config::{GeneralConfig, HitcountConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            use colored::Colorize;
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let loaded = HitcountConfig::load(&cli.config).await;

    // A broken config still gets logs, so `config validate` can report it.
    let default_general = GeneralConfig::default();
    let general = loaded.as_ref().map_or(&default_general, |c| &c.general);
    logging::init_tracing(general, cli.log_level.as_deref())?;

    tracing::debug!(config = %cli.config.display(), "hitcount starting");

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Summary(args) => commands::summary::execute(args, &loaded?, &writer).await,
        Commands::Url(args) => commands::url::execute(args, &loaded?, &writer).await,
        Commands::Crawlers => commands::crawlers::execute(&loaded?, &writer).await,
        Commands::Rules(args) => commands::rules::execute(args, loaded, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, loaded, &writer),
    }
}
