// insiders-core/src/infrastructure/logs.rs

use std::fs;
use std::path::Path;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::domain::report::LogFile;
use crate::infrastructure::error::InfrastructureError;

/// Returns the last log file of `log_dir` by file name. Log names start with
/// a timestamp, so name order is run order. Subdirectories are ignored.
#[instrument]
pub fn latest_log(log_dir: &Path) -> Result<Option<LogFile>, InfrastructureError> {
    if !log_dir.is_dir() {
        debug!("Log directory does not exist");
        return Ok(None);
    }

    let latest = WalkDir::new(log_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .max_by(|a, b| a.file_name().cmp(b.file_name()));

    let Some(entry) = latest else {
        return Ok(None);
    };

    // Logs may come from tools writing Latin-1; never fail on encoding.
    let bytes = fs::read(entry.path())?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    debug!(path = ?entry.path(), lines = content.lines().count(), "Latest log selected");

    Ok(Some(LogFile {
        path: entry.into_path(),
        content,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_latest_log_by_name() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("2024-01-01T09:00:00.log"), "old\n")?;
        fs::write(dir.path().join("2024-01-08T09:00:00.log"), "new\nrun\n")?;
        fs::create_dir(dir.path().join("zz_archive"))?;

        let log = latest_log(dir.path())?.unwrap();
        assert!(log.path.ends_with("2024-01-08T09:00:00.log"));
        assert_eq!(log.line_count(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_or_missing_dir() -> Result<()> {
        let dir = tempdir()?;
        assert!(latest_log(dir.path())?.is_none());
        assert!(latest_log(&dir.path().join("missing"))?.is_none());
        Ok(())
    }
}
