//! Log file discovery via glob patterns.

use std::path::{Path, PathBuf};

use glob::glob;

use crate::error::CliError;

/// Returns every file matching `{log_dir}/{file_pattern}`, sorted by path.
///
/// Directories and unreadable entries are skipped.
pub fn discover_log_files(log_dir: &Path, file_pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    let pattern = resolve_glob(log_dir, file_pattern);
    let mut paths: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| CliError::Config(format!("invalid file pattern '{pattern}': {e}")))?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}

fn resolve_glob(root: &Path, pattern: &str) -> String {
    root.join(pattern).to_string_lossy().into_owned()
}
