//! `hitcount summary` command handler

use std::io::Write;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use hitcount_core::config::HitcountConfig;
use hitcount_log_pipeline::{RuleEngine, Summary};

use crate::cli::SummaryArgs;
use crate::commands::ingest_all;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `summary` command.
///
/// The top URL list covers `--date` (default: today in UTC) and holds
/// `--top` entries (default: `report.top_n`). Without `--date` the previous
/// day is only counted up to the current time of day.
pub async fn execute(
    args: SummaryArgs,
    config: &HitcountConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let top_n = args.top.unwrap_or(config.report.top_n);
    if top_n == 0 {
        return Err(CliError::Command("--top must be greater than 0".to_owned()));
    }

    let engine = RuleEngine::load(&config.ingest.content_exclude_path).await?;
    let ingested = ingest_all(config).await?;

    let summary = match args.date {
        Some(date) => Summary::build(&ingested.records, &engine, date, top_n),
        None => Summary::build_as_of(&ingested.records, &engine, Utc::now(), top_n),
    };
    info!(date = %summary.date, top_n, records = ingested.records.len(), "built summary");

    let report = SummaryReport {
        files: ingested.files,
        summary,
    };

    writer.render(&report)?;
    Ok(())
}

/// `summary` output payload.
#[derive(Serialize)]
pub struct SummaryReport {
    /// Number of log files ingested
    pub files: usize,
    #[serde(flatten)]
    pub summary: Summary,
}

impl Render for SummaryReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let s = &self.summary;
        writeln!(w, "{}", "Access Log Summary".bold())?;
        writeln!(w, "  Files:          {}", self.files)?;
        writeln!(w, "  Records:        {}", s.total_records)?;
        writeln!(w, "  Crawlers:       {}", s.crawler_records.to_string().yellow())?;
        writeln!(w, "  Not found:      {}", s.not_found.to_string().red())?;
        writeln!(w, "  Content hits:   {}", s.content_hits.to_string().green())?;
        writeln!(w)?;
        writeln!(
            w,
            "Top URLs on {} ({} content hits)",
            s.date.to_string().bold(),
            s.date_content_hits
        )?;
        let diff = s.date_content_hits as i64 - s.previous_day_hits as i64;
        let diff = if diff < 0 {
            diff.to_string().red()
        } else {
            format!("+{diff}").green()
        };
        writeln!(
            w,
            "  Previous day:   {} ({diff})",
            s.previous_day_hits
        )?;

        if s.top_urls.is_empty() {
            writeln!(w, "  (none)")?;
            return Ok(());
        }

        writeln!(w, "{:>8}  URL", "Hits")?;
        writeln!(w, "{}", "-".repeat(60))?;
        for entry in &s.top_urls {
            writeln!(w, "{:>8}  {}", entry.count, entry.key)?;
        }

        Ok(())
    }
}
