//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// hitcount -- content page views from nginx access logs.
///
/// Use `hitcount <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "hitcount", version, about, long_about = None)]
pub struct Cli {
    /// Path to the hitcount.toml configuration file.
    #[arg(short, long, global = true, default_value = "hitcount.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest all logs and show totals plus the top content URLs of a day.
    Summary(SummaryArgs),

    /// Show status codes, referrers, addresses and user agents for one URL.
    Url(UrlArgs),

    /// Show crawler traffic grouped by matching signature.
    Crawlers,

    /// Manage content exclude rules.
    Rules(RulesArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- summary ----

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Day (UTC, YYYY-MM-DD) for the top URL list (default: today).
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Number of URLs in the top list (default: report.top_n).
    #[arg(long)]
    pub top: Option<usize>,
}

// ---- url ----

#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Normalized URL to inspect (compared case-insensitively).
    pub url: String,

    /// Limit to one day (UTC, YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

// ---- rules ----

#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// Parse a content exclude rule list and report the first malformed line.
    Validate {
        /// Rule list file (default: ingest.content_exclude_path).
        path: Option<PathBuf>,
    },
}

// ---- config ----

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, ingest, report).
        #[arg(long)]
        section: Option<String>,
    },
}
