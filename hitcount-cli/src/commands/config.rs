//! `hitcount config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use hitcount_core::config::HitcountConfig;
use hitcount_core::error::HitcountError;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
///
/// `loaded` is the result of `HitcountConfig::load` on `config_path`.
pub fn execute(
    args: ConfigArgs,
    config_path: &Path,
    loaded: Result<HitcountConfig, HitcountError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, loaded, writer),
        ConfigAction::Show { section } => execute_show(config_path, &loaded?, section, writer),
    }
}

/// Report whether the configuration file loads and validates.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (missing file, invalid values, parse errors).
fn execute_validate(
    config_path: &Path,
    loaded: Result<HitcountConfig, HitcountError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match loaded {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Display the effective configuration (file + env overrides + defaults).
fn execute_show(
    config_path: &Path,
    config: &HitcountConfig,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config_toml = match section.as_deref() {
        None => toml::to_string_pretty(config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("ingest") => toml::to_string_pretty(&config.ingest),
        Some("report") => toml::to_string_pretty(&config.report),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {other} (expected: general, ingest, report)"
            )));
        }
    }
    .map_err(|e| CliError::Command(format!("failed to serialize configuration: {e}")))?;

    let report = ConfigReport {
        source: config_path.display().to_string(),
        section,
        config_toml,
    };

    writer.render(&report)?;
    Ok(())
}

/// Configuration display report.
///
/// The `config_toml` field is skipped during JSON serialization (only used for text rendering).
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{section}]");
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
