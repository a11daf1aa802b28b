//! `hitcount url` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use hitcount_core::config::HitcountConfig;
use hitcount_log_pipeline::UrlDetails;
use hitcount_log_pipeline::report::GroupCount;

use crate::cli::UrlArgs;
use crate::commands::ingest_all;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `url` command.
pub async fn execute(
    args: UrlArgs,
    config: &HitcountConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    if args.url.trim().is_empty() {
        return Err(CliError::Command("url must not be empty".to_owned()));
    }

    let ingested = ingest_all(config).await?;
    info!(url = %args.url, records = ingested.records.len(), "building url details");

    let report = UrlReport(UrlDetails::build(&ingested.records, &args.url, args.date));
    writer.render(&report)?;
    Ok(())
}

/// `url` output payload.
#[derive(Serialize)]
#[serde(transparent)]
pub struct UrlReport(pub UrlDetails);

impl Render for UrlReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let d = &self.0;
        match d.date {
            Some(date) => writeln!(w, "URL {} on {}", d.url.bold(), date)?,
            None => writeln!(w, "URL {}", d.url.bold())?,
        }
        writeln!(
            w,
            "  Requests: {} total, {} users, {} crawlers",
            d.total,
            d.users.to_string().green(),
            d.crawlers.to_string().yellow()
        )?;

        if d.total == 0 {
            return Ok(());
        }

        writeln!(w)?;
        writeln!(w, "Status codes (users)")?;
        for entry in &d.status_codes {
            let status = entry.status.to_string();
            let status = if entry.status >= 400 {
                status.red()
            } else {
                status.normal()
            };
            writeln!(w, "{:>8}  {}", entry.count, status)?;
        }

        render_group(w, "Referrers", &d.referrers)?;
        render_group(w, "Remote addresses", &d.remote_addresses)?;
        render_group(w, "User agents", &d.user_agents)?;
        render_group(w, "Crawler user agents", &d.crawler_user_agents)?;

        Ok(())
    }
}

fn render_group(w: &mut dyn Write, title: &str, entries: &[GroupCount]) -> std::io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{title}")?;
    for entry in entries {
        writeln!(w, "{:>8}  {}", entry.count, entry.key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitcount_log_pipeline::report::StatusCount;

    fn details() -> UrlDetails {
        UrlDetails {
            url: "/posts/rust".to_owned(),
            date: None,
            total: 5,
            crawlers: 2,
            users: 3,
            status_codes: vec![
                StatusCount {
                    status: 200,
                    count: 2,
                },
                StatusCount {
                    status: 404,
                    count: 1,
                },
            ],
            referrers: vec![GroupCount {
                key: "https://example.com/".to_owned(),
                count: 1,
            }],
            remote_addresses: Vec::new(),
            user_agents: Vec::new(),
            crawler_user_agents: vec![GroupCount {
                key: "Googlebot/2.1".to_owned(),
                count: 2,
            }],
        }
    }

    #[test]
    fn test_url_render_text() {
        let mut buffer = Vec::new();
        UrlReport(details())
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("/posts/rust"));
        assert!(output.contains("Referrers"));
        assert!(output.contains("https://example.com/"));
        assert!(output.contains("Googlebot/2.1"));
        assert!(!output.contains("Remote addresses"), "empty groups are skipped");
    }

    #[test]
    fn test_url_render_text_no_requests() {
        let empty = UrlDetails {
            total: 0,
            crawlers: 0,
            users: 0,
            status_codes: Vec::new(),
            referrers: Vec::new(),
            crawler_user_agents: Vec::new(),
            ..details()
        };

        let mut buffer = Vec::new();
        UrlReport(empty)
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("0 total"));
        assert!(!output.contains("Status codes"));
    }

    #[test]
    fn test_url_json_is_transparent() {
        let value = serde_json::to_value(UrlReport(details())).expect("should serialize");
        assert_eq!(value["url"], "/posts/rust");
        assert_eq!(value["status_codes"][1]["status"], 404);
    }
}
