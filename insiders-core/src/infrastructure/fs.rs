// insiders-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;

/// Write content to a file atomically using a temporary file in the same
/// directory, then renaming it over the target. Readers never observe a
/// half-written report.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Pretty JSON, written atomically.
pub fn write_json<P: AsRef<Path>, T: Serialize>(
    path: P,
    value: &T,
) -> Result<(), InfrastructureError> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json)
}

/// Reads raw bytes from a file, or from stdin when `path` is `-`.
pub fn read_source(path: &Path) -> Result<Vec<u8>, InfrastructureError> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read(path)?)
}
