//! Fixture exports for ingestion tests
//!
//! Writes small export files into a temp directory so tests exercise
//! the real file-backed pipeline end to end.

use std::path::PathBuf;
use tempfile::TempDir;

/// Wrap a body in the standard export envelope and write it to disk.
pub fn write_export(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let content = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<df_world>\n{body}\n</df_world>\n"
    );
    write_raw(dir, name, content.as_bytes())
}

/// Write exact bytes, for fixtures that need control characters or
/// broken markup.
pub fn write_raw(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write fixture export");
    path
}
