//! Output file helpers
//!
//! Every writer creates missing parent directories first. Handles are closed
//! before the helpers return, on success and on error.

use crate::{ForgeError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// UTF-8 byte order mark, so spreadsheet tools detect the encoding
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Create the parent directory of `path` if it does not exist
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| ForgeError::file_access(dir, e))
        }
        _ => Ok(()),
    }
}

/// Write a text artifact, replacing any previous content
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content).map_err(|e| ForgeError::file_access(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Write through a temp file in the same directory, then rename over `path`
///
/// An existing file keeps its permissions.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ForgeError::file_access(dir, e))?;
    tmp.write_all(content)
        .and_then(|_| tmp.flush())
        .map_err(|e| ForgeError::file_access(tmp.path(), e))?;
    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| ForgeError::file_access(tmp.path(), e))?;
    }
    tmp.persist(path)
        .map_err(|e| ForgeError::file_access(path, e.error))?;
    Ok(())
}

/// Write tab-separated rows prefixed with a UTF-8 BOM
pub fn write_tsv(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut content = String::new();
    for row in rows {
        let fields: Vec<String> = row.iter().map(|field| escape_tsv_field(field)).collect();
        content.push_str(&fields.join("\t"));
        content.push('\n');
    }

    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + content.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(content.as_bytes());

    ensure_parent_dir(path)?;
    fs::write(path, bytes).map_err(|e| ForgeError::file_access(path, e))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote tsv");
    Ok(())
}

/// Quote a field when it contains a delimiter, quote, or line break
fn escape_tsv_field(field: &str) -> String {
    if field.contains(['\t', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
