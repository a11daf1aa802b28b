//! Command handlers -- one module per subcommand

pub mod config;
pub mod crawlers;
pub mod rules;
pub mod summary;
pub mod url;

use std::sync::Arc;

use tracing::info;

use hitcount_core::config::HitcountConfig;
use hitcount_core::types::LogRecord;
use hitcount_log_pipeline::{AccessLogParser, CrawlerSignatures, IngestConfig, LogIngestor};

use crate::discover::discover_log_files;
use crate::error::CliError;

/// Files and records collected for a report.
pub struct Ingested {
    pub files: usize,
    pub records: Vec<LogRecord>,
}

/// Load crawler signatures, discover log files and ingest all of them.
///
/// Signatures must load before any file is parsed.
pub async fn ingest_all(config: &HitcountConfig) -> Result<Ingested, CliError> {
    // Already validated by `HitcountConfig::load`.
    let ingest = IngestConfig::from_core(&config.ingest);

    let signatures = CrawlerSignatures::load(&ingest.crawler_signatures_path).await?;
    let parser = Arc::new(AccessLogParser::new(signatures));

    let files = discover_log_files(&ingest.log_dir, &ingest.file_pattern)?;
    info!(
        log_dir = %ingest.log_dir.display(),
        pattern = %ingest.file_pattern,
        files = files.len(),
        "discovered log files"
    );

    let ingestor = LogIngestor::from_config(&ingest, parser);
    let records = ingestor.ingest(&files).await?;

    Ok(Ingested {
        files: files.len(),
        records,
    })
}
