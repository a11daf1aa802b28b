//! `hitcount rules` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use hitcount_core::config::HitcountConfig;
use hitcount_core::error::HitcountError;
use hitcount_log_pipeline::{CheckKind, LogPipelineError, RuleEngine};

use crate::cli::{RulesAction, RulesArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `rules` command.
///
/// An explicit path makes the configuration file optional.
pub async fn execute(
    args: RulesArgs,
    config: Result<HitcountConfig, HitcountError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        RulesAction::Validate { path } => {
            let path = match path {
                Some(path) => path,
                None => PathBuf::from(config?.ingest.content_exclude_path),
            };
            execute_validate(&path, writer).await
        }
    }
}

async fn execute_validate(path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %path.display(), "validating content exclude rules");

    let report = match RuleEngine::load(path).await {
        Ok(engine) => RuleValidationReport::valid(path, &engine),
        Err(LogPipelineError::MalformedRule { line, raw, reason }) => RuleValidationReport {
            path: path.display().to_string(),
            valid: false,
            total: 0,
            kinds: Vec::new(),
            error: Some(RuleErrorEntry {
                line,
                rule: raw,
                error: reason.to_string(),
            }),
        },
        Err(e) => return Err(e.into()),
    };

    writer.render(&report)?;

    if let Some(ref err) = report.error {
        return Err(CliError::MalformedInput(format!(
            "{}:{}: {}",
            report.path, err.line, err.error
        )));
    }

    Ok(())
}

#[derive(Serialize)]
pub struct RuleValidationReport {
    pub path: String,
    pub valid: bool,
    pub total: usize,
    pub kinds: Vec<RuleKindCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RuleErrorEntry>,
}

#[derive(Serialize)]
pub struct RuleKindCount {
    pub kind: String,
    pub prefix: char,
    pub count: usize,
}

#[derive(Serialize)]
pub struct RuleErrorEntry {
    pub line: usize,
    pub rule: String,
    pub error: String,
}

impl RuleValidationReport {
    fn valid(path: &Path, engine: &RuleEngine) -> Self {
        let kinds = [
            CheckKind::Equals,
            CheckKind::StartsWith,
            CheckKind::EndsWith,
            CheckKind::Contains,
        ]
        .into_iter()
        .map(|kind| RuleKindCount {
            kind: kind.to_string(),
            prefix: kind.prefix(),
            count: engine.rules().iter().filter(|r| r.kind() == kind).count(),
        })
        .filter(|entry| entry.count > 0)
        .collect();

        Self {
            path: path.display().to_string(),
            valid: true,
            total: engine.rule_count(),
            kinds,
            error: None,
        }
    }
}

impl Render for RuleValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Rule Validation: {}", self.path.bold())?;

        match self.error {
            None => {
                writeln!(w, "  Result: {}", "VALID".green().bold())?;
                writeln!(w, "  Rules:  {}", self.total)?;
                for entry in &self.kinds {
                    writeln!(w, "    {} {:<12} {}", entry.prefix, entry.kind, entry.count)?;
                }
            }
            Some(ref err) => {
                writeln!(w, "  Result: {}", "INVALID".red().bold())?;
                writeln!(w, "  Line {}: {}", err.line, err.error.red())?;
                writeln!(w, "    {}", err.rule)?;
            }
        }

        Ok(())
    }
}
