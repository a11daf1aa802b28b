//! `hitcount crawlers` command handler

use std::io::Write;

use serde::Serialize;

use hitcount_core::config::HitcountConfig;
use hitcount_log_pipeline::CrawlerStats;

use crate::commands::ingest_all;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `crawlers` command.
pub async fn execute(config: &HitcountConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let ingested = ingest_all(config).await?;
    let report = CrawlerReport(CrawlerStats::build(&ingested.records));
    writer.render(&report)?;
    Ok(())
}

/// `crawlers` output payload.
#[derive(Serialize)]
#[serde(transparent)]
pub struct CrawlerReport(pub CrawlerStats);

impl Render for CrawlerReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Crawler Traffic ({} requests)",
            self.0.total.to_string().bold()
        )?;

        for group in &self.0.groups {
            writeln!(w)?;
            writeln!(w, "{:>8}  {}", group.total, group.token.yellow().bold())?;
            for agent in &group.user_agents {
                writeln!(w, "{:>8}    {}", agent.count, agent.key)?;
            }
        }

        Ok(())
    }
}
