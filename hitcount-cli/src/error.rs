//! CLI-specific error types and exit code mapping

use hitcount_core::error::HitcountError;
use hitcount_log_pipeline::LogPipelineError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// A log line or rule line could not be parsed.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from hitcount-core.
    #[error("{0}")]
    Core(#[from] HitcountError),

    /// Log ingestion or rule loading failed.
    #[error("{0}")]
    Pipeline(LogPipelineError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | General / command / ingest error     |
    /// | 2    | Configuration error                  |
    /// | 3    | Malformed log line or rule           |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Core(HitcountError::Config(_)) => 2,
            Self::MalformedInput(_) => 3,
            Self::Pipeline(e) if e.is_malformed_input() => 3,
            Self::Io(_) | Self::Core(HitcountError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) | Self::Pipeline(_) => 1,
        }
    }
}

impl From<LogPipelineError> for CliError {
    fn from(e: LogPipelineError) -> Self {
        Self::Pipeline(e)
    }
}
