//! Compact serialization and atomic writes of merged documents.

use crate::error::CatalogError;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Serialize without any whitespace, keeping object key order
pub fn to_compact_string(document: &Value) -> Result<String, CatalogError> {
    Ok(serde_json::to_string(document)?)
}

/// Write `document` compactly to `path`, creating parent directories.
///
/// The bytes go to a hidden sibling temp file first and are renamed into place, so an
/// interrupted write never leaves a truncated document behind. Returns bytes written.
pub fn write_document(path: &Path, document: &Value) -> Result<usize, CatalogError> {
    let serialized = to_compact_string(document)?;
    let io_error = |path: &Path, source: std::io::Error| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let written = fs::File::create(&temp_path).and_then(|mut file| {
        file.write_all(serialized.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(&temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        // Clean up temp file on error
        let _ = fs::remove_file(&temp_path);
        io_error(path, e)
    })?;

    Ok(serialized.len())
}

/// `dir/.name.tmp` next to the target; the leading dot and the suffix keep it out of
/// fragment listings.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
